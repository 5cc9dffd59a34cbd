//! InMemory Plaza Repository
//!
//! Implements the domain's `PlazaRepository` trait on top of a `Plaza`
//! aggregate guarded by a tokio `Mutex`. Each trait method takes the lock
//! exactly once, so every mutation is atomic with respect to other
//! connections' events.
//!
//! State is process-local and lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    ArtId, Artwork, ChatRecord, Color, Departure, House, HouseId, LeaderboardEntry,
    MessageContent, Movement, Plaza, PlazaLimits, PlazaRepository, Points, PublicationGate,
    RepositoryError, ScoreAward, Session, SessionChange, SessionId, SessionProfile, Timestamp,
};

pub struct InMemoryPlazaRepository {
    plaza: Arc<Mutex<Plaza>>,
    gate: PublicationGate,
}

impl InMemoryPlazaRepository {
    pub fn new(plaza: Arc<Mutex<Plaza>>) -> Self {
        Self {
            plaza,
            gate: Arc::new(RwLock::new(())),
        }
    }
}

#[async_trait]
impl PlazaRepository for InMemoryPlazaRepository {
    async fn limits(&self) -> PlazaLimits {
        self.plaza.lock().await.limits()
    }

    fn publication_gate(&self) -> PublicationGate {
        self.gate.clone()
    }

    async fn add_session(&self, session: Session) {
        self.plaza.lock().await.add_session(session);
    }

    async fn remove_session(&self, id: &SessionId) -> Option<Departure> {
        self.plaza.lock().await.remove_session(id)
    }

    async fn get_session(&self, id: &SessionId) -> Option<Session> {
        self.plaza.lock().await.session(id).cloned()
    }

    async fn get_sessions(&self) -> Vec<Session> {
        self.plaza.lock().await.sessions()
    }

    async fn get_all_session_ids(&self) -> Vec<SessionId> {
        self.plaza.lock().await.session_ids()
    }

    async fn count_sessions(&self) -> usize {
        self.plaza.lock().await.session_count()
    }

    async fn init_session(
        &self,
        id: &SessionId,
        profile: SessionProfile,
    ) -> Result<Session, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.init_session(id, profile)?)
    }

    async fn move_session(
        &self,
        id: &SessionId,
        movement: Movement,
    ) -> Result<(), RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.move_session(id, movement)?)
    }

    async fn apply_change(
        &self,
        id: &SessionId,
        change: &SessionChange,
    ) -> Result<(), RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.apply_change(id, change)?)
    }

    async fn add_score(
        &self,
        id: &SessionId,
        points: Points,
    ) -> Result<(ScoreAward, Vec<LeaderboardEntry>), RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        let award = plaza.add_score(id, points)?;
        Ok((award, plaza.leaderboard()))
    }

    async fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.plaza.lock().await.leaderboard()
    }

    async fn post_chat(
        &self,
        from: &SessionId,
        content: MessageContent,
        time: Timestamp,
    ) -> Result<ChatRecord, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.post_chat(from, content, time)?)
    }

    async fn get_chat_history(&self) -> Vec<ChatRecord> {
        self.plaza.lock().await.chat_history()
    }

    async fn count_chat(&self) -> usize {
        self.plaza.lock().await.chat_count()
    }

    async fn buy_house(
        &self,
        buyer: &SessionId,
        house_id: HouseId,
        color: Option<Color>,
    ) -> Result<House, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.buy_house(buyer, house_id, color)?)
    }

    async fn upgrade_house(
        &self,
        caller: &SessionId,
        house_id: &HouseId,
    ) -> Result<House, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.upgrade_house(caller, house_id)?)
    }

    async fn change_house_color(
        &self,
        caller: &SessionId,
        house_id: &HouseId,
        color: Color,
    ) -> Result<House, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.change_house_color(caller, house_id, color)?)
    }

    async fn get_houses(&self) -> Vec<House> {
        self.plaza.lock().await.houses()
    }

    async fn publish_art(
        &self,
        publisher: &SessionId,
        artwork: Artwork,
    ) -> Result<Artwork, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        Ok(plaza.publish_art(publisher, artwork)?)
    }

    async fn delete_art(
        &self,
        caller: &SessionId,
        art_id: &ArtId,
    ) -> Result<Vec<Artwork>, RepositoryError> {
        let mut plaza = self.plaza.lock().await;
        plaza.delete_art(caller, art_id)?;
        Ok(plaza.artworks())
    }

    async fn get_artworks(&self) -> Vec<Artwork> {
        self.plaza.lock().await.artworks()
    }

    async fn count_artworks(&self) -> usize {
        self.plaza.lock().await.artwork_count()
    }
}
