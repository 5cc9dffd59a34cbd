//! UseCase: player disconnection
//!
//! The departing session is dropped from the roster and every house it owned
//! is released. Remaining sessions learn about the departure through
//! `houses-updated` (only if something was released), `player-left`, and a
//! fresh `leaderboard-update` when the departing player had scored.

use std::sync::Arc;

use crate::{
    domain::{Audience, Departure, MessagePusher, PlazaRepository, SessionId},
    infrastructure::dto::{conversion::house_registry, websocket::ServerEvent},
};

use super::{
    broadcast::{fan_out, publishing},
    error::DisconnectError,
};

pub struct DisconnectPlayerUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPlayerUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Remove the session and notify everyone who is still connected.
    pub async fn execute(&self, id: &SessionId) -> Result<Departure, DisconnectError> {
        self.message_pusher.unregister_client(id).await;

        let _publishing = publishing(self.repository.as_ref()).await;
        let departure = self
            .repository
            .remove_session(id)
            .await
            .ok_or_else(|| DisconnectError::SessionNotFound(id.to_string()))?;

        if !departure.released_houses.is_empty() {
            let houses = house_registry(self.repository.get_houses().await);
            self.notify(&ServerEvent::HousesUpdated(houses)).await?;
        }

        self.notify(&ServerEvent::PlayerLeft(id.to_string())).await?;

        if departure.session.score > 0 {
            let leaderboard = self
                .repository
                .get_leaderboard()
                .await
                .into_iter()
                .map(Into::into)
                .collect();
            self.notify(&ServerEvent::LeaderboardUpdate(leaderboard))
                .await?;
        }

        Ok(departure)
    }

    async fn notify(&self, event: &ServerEvent) -> Result<(), DisconnectError> {
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::All,
            event,
        )
        .await?;
        Ok(())
    }
}
