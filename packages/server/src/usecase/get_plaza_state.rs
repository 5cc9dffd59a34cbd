//! UseCase: read-only snapshots for the HTTP API

use std::sync::Arc;

use plaza_shared::time::Clock;

use crate::domain::{House, LeaderboardEntry, PlazaRepository, Session, Timestamp};

/// Point-in-time summary of the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct PlazaOverview {
    pub sessions: Vec<Session>,
    pub houses: Vec<House>,
    pub art_count: usize,
    pub chat_count: usize,
    pub checked_at: Timestamp,
}

pub struct GetPlazaStateUseCase {
    repository: Arc<dyn PlazaRepository>,
    clock: Arc<dyn Clock>,
}

impl GetPlazaStateUseCase {
    pub fn new(repository: Arc<dyn PlazaRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// The reads are separate critical sections, so concurrent mutations may
    /// land between them.
    pub async fn overview(&self) -> PlazaOverview {
        PlazaOverview {
            sessions: self.repository.get_sessions().await,
            houses: self.repository.get_houses().await,
            art_count: self.repository.count_artworks().await,
            chat_count: self.repository.count_chat().await,
            checked_at: Timestamp::new(self.clock.now_millis()),
        }
    }

    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.repository.get_leaderboard().await
    }
}
