//! WebSocket event frames.
//!
//! Every frame is a JSON object `{"event": "<kebab-case name>", "data": <payload>}`.
//! `ClientEvent` holds the intents a browser may send, `ServerEvent` the facts
//! the relay pushes back. Payload keys are camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ========================================
// Client → Server
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    InitPlayer(InitPlayerPayload),
    SwitchWorld(String),
    Move(MovePayload),
    ChangeColor(String),
    ChangeVehicle(bool),
    UpdateCharacterType(String),
    Chat(String),
    MathSolved(u32),
    BuyHouse(BuyHousePayload),
    UpgradeHouse(String),
    ChangeHouseColor(HouseColorPayload),
    PublishArt(PublishArtPayload),
    DeleteArt(String),
    XoxMove(XoxMovePayload),
    VoiceJoin,
    VoiceSignal(VoiceSignalPayload),
}

impl ClientEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::InitPlayer(_) => "init-player",
            ClientEvent::SwitchWorld(_) => "switch-world",
            ClientEvent::Move(_) => "move",
            ClientEvent::ChangeColor(_) => "change-color",
            ClientEvent::ChangeVehicle(_) => "change-vehicle",
            ClientEvent::UpdateCharacterType(_) => "update-character-type",
            ClientEvent::Chat(_) => "chat",
            ClientEvent::MathSolved(_) => "math-solved",
            ClientEvent::BuyHouse(_) => "buy-house",
            ClientEvent::UpgradeHouse(_) => "upgrade-house",
            ClientEvent::ChangeHouseColor(_) => "change-house-color",
            ClientEvent::PublishArt(_) => "publish-art",
            ClientEvent::DeleteArt(_) => "delete-art",
            ClientEvent::XoxMove(_) => "xox-move",
            ClientEvent::VoiceJoin => "voice-join",
            ClientEvent::VoiceSignal(_) => "voice-signal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPlayerPayload {
    pub name: String,
    pub color: String,
    #[serde(default = "default_character_type")]
    pub character_type: String,
    #[serde(default)]
    pub customization: Map<String, Value>,
    #[serde(default)]
    pub is_driving: bool,
}

fn default_character_type() -> String {
    "child".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub world: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyHousePayload {
    pub house_id: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseColorPayload {
    pub house_id: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishArtPayload {
    pub image: String,
    pub artist: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    #[serde(default)]
    pub house_id: Option<String>,
}

/// Used in both directions: `xox-move` in, `xox-update` out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XoxMovePayload {
    pub board_id: String,
    pub index: u8,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSignalPayload {
    pub target_id: String,
    pub signal: Value,
}

// ========================================
// Server → Client
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Session id assigned to the receiving connection
    Connected(String),
    CurrentPlayers(BTreeMap<String, PlayerDto>),
    ChatHistory(Vec<ChatRecordDto>),
    PlayerJoined(PlayerJoinedPayload),
    PlayerUpdated(PlayerUpdatedPayload),
    PlayerMoved(PlayerMovedPayload),
    PlayerChat(ChatRecordDto),
    LeaderboardUpdate(Vec<LeaderboardEntryDto>),
    MathNotification(MathNotificationPayload),
    HouseBought(HouseDto),
    HouseUpgraded(HouseDto),
    HouseColorChanged(HouseDto),
    HousesUpdated(BTreeMap<String, HouseDto>),
    NewArt(ArtworkDto),
    LoadArt(Vec<ArtworkDto>),
    XoxUpdate(XoxMovePayload),
    VoiceReady(VoiceReadyPayload),
    VoiceSignal(VoiceSignalRelayPayload),
    PlayerLeft(String),
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub character_type: String,
    pub customization: Map<String, Value>,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub is_driving: bool,
    pub score: u32,
    pub world: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoinedPayload {
    pub id: String,
    pub data: PlayerDto,
}

/// Partial update; only the changed field is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdatedPayload {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_driving: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovedPayload {
    pub id: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub world: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecordDto {
    pub id: String,
    pub message: String,
    pub name: String,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub id: String,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathNotificationPayload {
    pub id: String,
    pub name: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseDto {
    pub id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub color: String,
    pub rank: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDto {
    pub id: String,
    pub image: String,
    pub artist: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub house_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceReadyPayload {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSignalRelayPayload {
    pub sender_id: String,
    pub signal: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_init_player_with_defaults() {
        // テスト項目: init-player の省略可能なフィールドにデフォルト値が入る
        // given (前提条件):
        let text = r#"{"event":"init-player","data":{"name":"Zeynep","color":"red"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::InitPlayer(InitPlayerPayload {
                name: "Zeynep".to_string(),
                color: "red".to_string(),
                character_type: "child".to_string(),
                customization: Map::new(),
                is_driving: false,
            })
        );
        assert_eq!(event.name(), "init-player");
    }

    #[test]
    fn test_parse_scalar_payloads() {
        // テスト項目: スカラー値のペイロードを持つイベントが解析できる
        let cases = [
            (r#"{"event":"switch-world","data":"town"}"#, ClientEvent::SwitchWorld("town".to_string())),
            (r#"{"event":"change-vehicle","data":true}"#, ClientEvent::ChangeVehicle(true)),
            (r#"{"event":"math-solved","data":50}"#, ClientEvent::MathSolved(50)),
            (r#"{"event":"delete-art","data":"1-abc"}"#, ClientEvent::DeleteArt("1-abc".to_string())),
            (r#"{"event":"voice-join"}"#, ClientEvent::VoiceJoin),
        ];

        for (text, expected) in cases {
            let event: ClientEvent = serde_json::from_str(text).unwrap();
            assert_eq!(event, expected, "frame {text}");
        }
    }

    #[test]
    fn test_malformed_frames_are_rejected() {
        // テスト項目: 形式が不正なフレームは解析エラーになる
        let frames = [
            r#"{"event":"teleport","data":{}}"#,
            r#"{"event":"move","data":{"position":[1,2],"rotation":[0,0,0],"world":"hub"}}"#,
            r#"{"event":"math-solved","data":-5}"#,
            r#"{"event":"chat"}"#,
            r#"not json"#,
        ];

        for text in frames {
            assert!(
                serde_json::from_str::<ClientEvent>(text).is_err(),
                "frame {text} should be rejected"
            );
        }
    }

    #[test]
    fn test_server_event_frame_shape() {
        // テスト項目: サーバーイベントが {event, data} 形式・camelCase で出力される
        // given (前提条件):
        let event = ServerEvent::PlayerUpdated(PlayerUpdatedPayload {
            id: "abc".to_string(),
            is_driving: Some(true),
            ..Default::default()
        });

        // when (操作):
        let value: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "player-updated", "data": {"id": "abc", "isDriving": true}})
        );
    }

    #[test]
    fn test_freestanding_art_serializes_null_house() {
        // テスト項目: 家に属さない作品は houseId が null として出力される
        // given (前提条件):
        let event = ServerEvent::NewArt(ArtworkDto {
            id: "1-a".to_string(),
            image: "data:image/png;base64,AA".to_string(),
            artist: "Ada".to_string(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            house_id: None,
        });

        // when (操作):
        let value: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["event"], "new-art");
        assert_eq!(value["data"]["houseId"], Value::Null);
    }
}
