//! Fan-out of fact events.

use tokio::sync::OwnedRwLockReadGuard;

use crate::{
    domain::{Audience, MessagePusher, PlazaRepository, SessionId},
    infrastructure::dto::websocket::ServerEvent,
};

use super::error::BroadcastError;

/// Shared hold on the publication gate. Take it before mutating the plaza
/// and keep it until the resulting facts have been fanned out.
pub(crate) async fn publishing(repository: &dyn PlazaRepository) -> OwnedRwLockReadGuard<()> {
    repository.publication_gate().read_owned().await
}

/// Serialize `event` and push it to every connected session in `audience`.
///
/// Returns the sessions the event was addressed to.
pub(crate) async fn fan_out(
    repository: &dyn PlazaRepository,
    message_pusher: &dyn MessagePusher,
    audience: Audience,
    event: &ServerEvent,
) -> Result<Vec<SessionId>, BroadcastError> {
    let json = event
        .to_json()
        .map_err(|e| BroadcastError::Encode(e.to_string()))?;
    let targets = audience.resolve(repository.get_all_session_ids().await);
    message_pusher.broadcast(targets.clone(), &json).await?;
    Ok(targets)
}
