//! Repository trait
//!
//! The data-access interface the use cases depend on. The concrete store is
//! provided by the infrastructure layer (dependency inversion).
//!
//! Each method is a single atomic operation on the `Plaza` aggregate: an
//! implementation must never expose a state where only part of a mutation has
//! been applied.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    ArtId, Artwork, ChatRecord, Color, Departure, House, HouseId, LeaderboardEntry,
    MessageContent, Movement, PlazaLimits, Points, RepositoryError, ScoreAward, Session,
    SessionChange, SessionId, SessionProfile, Timestamp,
};

/// Orders fact publication against new connections.
///
/// Publishers hold it shared from their mutation until their fan-out is done.
/// A joining session holds it exclusively while it snapshots the plaza and
/// registers its channel, so every fact reaches it exactly once: inside the
/// snapshot or as a live frame after it.
pub type PublicationGate = Arc<RwLock<()>>;

#[async_trait]
pub trait PlazaRepository: Send + Sync {
    /// Registry capacities and slot count
    async fn limits(&self) -> PlazaLimits;

    fn publication_gate(&self) -> PublicationGate;

    // sessions
    async fn add_session(&self, session: Session);
    async fn remove_session(&self, id: &SessionId) -> Option<Departure>;
    async fn get_session(&self, id: &SessionId) -> Option<Session>;
    async fn get_sessions(&self) -> Vec<Session>;
    async fn get_all_session_ids(&self) -> Vec<SessionId>;
    async fn count_sessions(&self) -> usize;
    async fn init_session(
        &self,
        id: &SessionId,
        profile: SessionProfile,
    ) -> Result<Session, RepositoryError>;
    async fn move_session(&self, id: &SessionId, movement: Movement)
    -> Result<(), RepositoryError>;
    async fn apply_change(
        &self,
        id: &SessionId,
        change: &SessionChange,
    ) -> Result<(), RepositoryError>;

    // score
    async fn add_score(
        &self,
        id: &SessionId,
        points: Points,
    ) -> Result<(ScoreAward, Vec<LeaderboardEntry>), RepositoryError>;
    async fn get_leaderboard(&self) -> Vec<LeaderboardEntry>;

    // chat
    async fn post_chat(
        &self,
        from: &SessionId,
        content: MessageContent,
        time: Timestamp,
    ) -> Result<ChatRecord, RepositoryError>;
    async fn get_chat_history(&self) -> Vec<ChatRecord>;
    async fn count_chat(&self) -> usize;

    // houses
    async fn buy_house(
        &self,
        buyer: &SessionId,
        house_id: HouseId,
        color: Option<Color>,
    ) -> Result<House, RepositoryError>;
    async fn upgrade_house(
        &self,
        caller: &SessionId,
        house_id: &HouseId,
    ) -> Result<House, RepositoryError>;
    async fn change_house_color(
        &self,
        caller: &SessionId,
        house_id: &HouseId,
        color: Color,
    ) -> Result<House, RepositoryError>;
    async fn get_houses(&self) -> Vec<House>;

    // art
    async fn publish_art(
        &self,
        publisher: &SessionId,
        artwork: Artwork,
    ) -> Result<Artwork, RepositoryError>;
    async fn delete_art(
        &self,
        caller: &SessionId,
        art_id: &ArtId,
    ) -> Result<Vec<Artwork>, RepositoryError>;
    async fn get_artworks(&self) -> Vec<Artwork>;
    async fn count_artworks(&self) -> usize;
}
