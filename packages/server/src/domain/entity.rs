//! Domain entities.

use serde_json::{Map, Value};

use super::value_object::{
    ArtId, ArtImage, BoardId, CellIndex, CharacterType, Color, DisplayName, HouseId, HouseRank,
    MessageContent, SessionId, Symbol, Timestamp, Vec3, World,
};

/// Opaque key-value customization bag. Only clients interpret it.
pub type Customization = Map<String, Value>;

/// Live game state of one connected client.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub name: DisplayName,
    pub color: Color,
    pub character_type: CharacterType,
    pub customization: Customization,
    pub position: Vec3,
    pub rotation: Vec3,
    pub is_driving: bool,
    pub score: u32,
    pub world: World,
}

impl Session {
    /// A freshly connected session standing at `spawn` in the hub.
    pub fn new(id: SessionId, spawn: Vec3) -> Self {
        Self {
            id,
            name: DisplayName::default(),
            color: Color::default(),
            character_type: CharacterType::default(),
            customization: Customization::new(),
            position: spawn,
            rotation: Vec3::default(),
            is_driving: false,
            score: 0,
            world: World::default(),
        }
    }

    /// Overwrite the display fields chosen by the client.
    pub fn apply_profile(&mut self, profile: SessionProfile) {
        self.name = profile.name;
        self.color = profile.color;
        self.character_type = profile.character_type;
        self.customization = profile.customization;
        self.is_driving = profile.is_driving;
    }
}

/// Display fields pushed by the client right after connecting.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProfile {
    pub name: DisplayName,
    pub color: Color,
    pub character_type: CharacterType,
    pub customization: Customization,
    pub is_driving: bool,
}

/// A single-field change to a session, broadcast as `player-updated`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    World(World),
    Color(Color),
    Driving(bool),
    CharacterType(CharacterType),
}

/// An owned building slot.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: HouseId,
    pub owner_id: SessionId,
    /// Owner's display name captured at purchase time.
    pub owner_name: DisplayName,
    pub color: Color,
    pub rank: HouseRank,
}

/// A published drawing placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub id: ArtId,
    pub image: ArtImage,
    pub artist: DisplayName,
    pub position: Vec3,
    pub rotation: Vec3,
    /// `None` means a freestanding ground placement.
    pub house_id: Option<HouseId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    pub from: SessionId,
    pub content: MessageContent,
    pub name: DisplayName,
    pub time: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub id: SessionId,
    pub name: DisplayName,
    pub score: u32,
}

/// Result of a solved quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAward {
    pub id: SessionId,
    pub name: DisplayName,
    pub points: u32,
    pub total: u32,
}

/// A tic-tac-toe move relayed between clients. Boards are not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct XoxMove {
    pub board_id: BoardId,
    pub index: CellIndex,
    pub symbol: Symbol,
}

/// A movement update claimed by the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub position: Vec3,
    pub rotation: Vec3,
    pub world: World,
}
