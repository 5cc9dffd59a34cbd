//! Conversion between wire DTOs and domain types.
//!
//! DTO → domain conversions validate every field and fail with a
//! `DomainError`; domain → DTO conversions are infallible.

use std::collections::BTreeMap;

use crate::domain::{
    Artwork, BoardId, CellIndex, CharacterType, ChatRecord, Color, DisplayName, DomainError,
    House, LeaderboardEntry, Movement, Session, SessionChange, SessionId, SessionProfile, Symbol,
    Vec3, World, XoxMove,
};
use crate::infrastructure::dto::{http::PlayerSummaryDto, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::InitPlayerPayload> for SessionProfile {
    type Error = DomainError;

    fn try_from(payload: dto::InitPlayerPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: DisplayName::new(payload.name)?,
            color: Color::new(payload.color)?,
            character_type: CharacterType::try_from(payload.character_type.as_str())?,
            customization: payload.customization,
            is_driving: payload.is_driving,
        })
    }
}

impl TryFrom<dto::MovePayload> for Movement {
    type Error = DomainError;

    fn try_from(payload: dto::MovePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            position: Vec3::try_from(payload.position)?,
            rotation: Vec3::try_from(payload.rotation)?,
            world: World::try_from(payload.world.as_str())?,
        })
    }
}

impl TryFrom<dto::XoxMovePayload> for XoxMove {
    type Error = DomainError;

    fn try_from(payload: dto::XoxMovePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            board_id: BoardId::new(payload.board_id)?,
            index: CellIndex::new(payload.index)?,
            symbol: Symbol::try_from(payload.symbol.as_str())?,
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Session> for dto::PlayerDto {
    fn from(model: Session) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
            color: model.color.into_string(),
            character_type: model.character_type.as_str().to_string(),
            customization: model.customization,
            position: model.position.to_array(),
            rotation: model.rotation.to_array(),
            is_driving: model.is_driving,
            score: model.score,
            world: model.world.as_str().to_string(),
        }
    }
}

impl From<House> for dto::HouseDto {
    fn from(model: House) -> Self {
        Self {
            id: model.id.into_string(),
            owner_id: model.owner_id.into_string(),
            owner_name: model.owner_name.into_string(),
            color: model.color.into_string(),
            rank: model.rank.value(),
        }
    }
}

impl From<Artwork> for dto::ArtworkDto {
    fn from(model: Artwork) -> Self {
        Self {
            id: model.id.into_string(),
            image: model.image.into_string(),
            artist: model.artist.into_string(),
            position: model.position.to_array(),
            rotation: model.rotation.to_array(),
            house_id: model.house_id.map(|id| id.into_string()),
        }
    }
}

impl From<ChatRecord> for dto::ChatRecordDto {
    fn from(model: ChatRecord) -> Self {
        Self {
            id: model.from.into_string(),
            message: model.content.into_string(),
            name: model.name.into_string(),
            time: model.time.value(),
        }
    }
}

impl From<LeaderboardEntry> for dto::LeaderboardEntryDto {
    fn from(model: LeaderboardEntry) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
            score: model.score,
        }
    }
}

impl From<XoxMove> for dto::XoxMovePayload {
    fn from(model: XoxMove) -> Self {
        Self {
            board_id: model.board_id.into_string(),
            index: model.index.value(),
            symbol: model.symbol.as_str().to_string(),
        }
    }
}

impl From<Session> for PlayerSummaryDto {
    fn from(model: Session) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
            world: model.world.as_str().to_string(),
            score: model.score,
        }
    }
}

/// Build the `player-updated` payload for a single-field change.
pub fn player_updated(id: &SessionId, change: &SessionChange) -> dto::PlayerUpdatedPayload {
    let mut payload = dto::PlayerUpdatedPayload {
        id: id.as_str().to_string(),
        ..Default::default()
    };
    match change {
        SessionChange::World(world) => payload.world = Some(world.as_str().to_string()),
        SessionChange::Color(color) => payload.color = Some(color.as_str().to_string()),
        SessionChange::Driving(driving) => payload.is_driving = Some(*driving),
        SessionChange::CharacterType(kind) => {
            payload.character_type = Some(kind.as_str().to_string())
        }
    }
    payload
}

/// Roster keyed by session id.
pub fn roster(sessions: Vec<Session>) -> BTreeMap<String, dto::PlayerDto> {
    sessions
        .into_iter()
        .map(|session| (session.id.as_str().to_string(), session.into()))
        .collect()
}

/// House registry keyed by house id.
pub fn house_registry(houses: Vec<House>) -> BTreeMap<String, dto::HouseDto> {
    houses
        .into_iter()
        .map(|house| (house.id.as_str().to_string(), house.into()))
        .collect()
}
