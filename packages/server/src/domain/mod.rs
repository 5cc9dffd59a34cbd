//! Domain layer: value objects, entities, the `Plaza` aggregate and the
//! interfaces the use cases need from the outside world.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod plaza;
pub mod repository;
pub mod value_object;

pub use entity::{
    Artwork, ChatRecord, Customization, House, LeaderboardEntry, Movement, ScoreAward,
    Session, SessionChange, SessionProfile, XoxMove,
};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use factory::{ArtIdFactory, SessionIdFactory, SpawnPointFactory};
pub use message_pusher::{Audience, MessagePusher, PusherChannel};
pub use plaza::{Departure, Plaza, PlazaLimits};
pub use repository::{PlazaRepository, PublicationGate};
pub use value_object::{
    ArtId, ArtImage, BoardId, CellIndex, CharacterType, Color, DisplayName, HouseId, HouseRank,
    MessageContent, Points, SessionId, Symbol, Timestamp, Vec3, World,
};
