//! UseCase: player connection
//!
//! A new connection gets a session with a random spawn point on the ring
//! around the central landmark. Nobody is told about it yet: other clients
//! learn about the session only once it sends `init-player`.
//!
//! The new client's channel starts with its own id, the roster snapshot and
//! the rest of the shared state (chat history, houses, gallery, leaderboard).
//! Live facts are delivered only after that backlog.

use std::sync::Arc;

use crate::{
    domain::{
        MessagePusher, PlazaRepository, PusherChannel, Session, SessionId, SessionIdFactory,
        SpawnPointFactory,
    },
    infrastructure::dto::{
        conversion::{house_registry, roster},
        websocket::ServerEvent,
    },
};

use super::error::{BroadcastError, ConnectError};

pub struct ConnectPlayerUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPlayerUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Allocate a session, queue its initial state on `sender` and register
    /// the channel for live facts.
    ///
    /// Backlog order: `connected`, `current-players`, `chat-history`,
    /// `houses-updated`, `load-art`, `leaderboard-update`. Publishers are
    /// held off for the whole step.
    pub async fn execute(&self, sender: PusherChannel) -> Result<Session, ConnectError> {
        let id = SessionIdFactory::generate();
        let spawn = SpawnPointFactory::generate(&mut rand::thread_rng());
        let session = Session::new(id.clone(), spawn);

        let _joining = self.repository.publication_gate().write_owned().await;
        self.repository.add_session(session.clone()).await;

        if let Err(e) = self.register(&id, sender).await {
            self.repository.remove_session(&id).await;
            return Err(e.into());
        }

        Ok(session)
    }

    async fn register(
        &self,
        id: &SessionId,
        sender: PusherChannel,
    ) -> Result<(), BroadcastError> {
        let backlog = self.initial_state(id).await?;
        self.message_pusher
            .register_with_backlog(id.clone(), sender, backlog)
            .await?;
        Ok(())
    }

    async fn initial_state(&self, id: &SessionId) -> Result<Vec<String>, BroadcastError> {
        let events = [
            ServerEvent::Connected(id.to_string()),
            ServerEvent::CurrentPlayers(roster(self.repository.get_sessions().await)),
            ServerEvent::ChatHistory(
                self.repository
                    .get_chat_history()
                    .await
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            ),
            ServerEvent::HousesUpdated(house_registry(self.repository.get_houses().await)),
            ServerEvent::LoadArt(
                self.repository
                    .get_artworks()
                    .await
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            ),
            ServerEvent::LeaderboardUpdate(
                self.repository
                    .get_leaderboard()
                    .await
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            ),
        ];

        events
            .iter()
            .map(|event| {
                event
                    .to_json()
                    .map_err(|e| BroadcastError::Encode(e.to_string()))
            })
            .collect()
    }
}
