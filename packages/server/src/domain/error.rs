//! Domain error types.

use thiserror::Error;

/// Value-object validation and aggregate invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("session id must not be empty")]
    InvalidSessionId,

    #[error("display name must be 1-24 characters")]
    InvalidDisplayName,

    #[error("color must be 1-32 characters")]
    InvalidColor,

    #[error("unknown world '{0}'")]
    UnknownWorld(String),

    #[error("unknown character type '{0}'")]
    UnknownCharacterType(String),

    #[error("vector components must be finite")]
    NonFiniteVector,

    #[error("chat message must be 1-200 characters")]
    InvalidMessageContent,

    #[error("invalid points value {0}")]
    InvalidPoints(u32),

    #[error("unknown house '{0}'")]
    UnknownHouse(String),

    #[error("invalid house rank {0}")]
    InvalidHouseRank(u8),

    #[error("art id must not be empty")]
    InvalidArtId,

    #[error("art image must be a data:image/ URI")]
    InvalidArtImage,

    #[error("art image is {size} bytes, limit is {max}")]
    ArtImageTooLarge { size: usize, max: usize },

    #[error("board id must be 1-64 characters")]
    InvalidBoardId,

    #[error("cell index {0} is outside the board")]
    InvalidCellIndex(u8),

    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("house '{0}' is already owned")]
    HouseAlreadyOwned(String),

    #[error("house '{0}' is not owned")]
    HouseNotOwned(String),

    #[error("session is not the owner of house '{0}'")]
    NotHouseOwner(String),

    #[error("house '{0}' is already at max rank")]
    HouseMaxRank(String),

    #[error("artwork '{0}' not found")]
    ArtNotFound(String),
}

/// Errors raised by a `PlazaRepository` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Errors raised by a `MessagePusher` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
