//! MessagePusher trait
//!
//! Abstraction over "deliver this serialized fact to these sessions". The
//! WebSocket implementation lives in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, SessionId};

/// Outbound channel of one connection; the UI layer drains it into the socket.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Which connections receive a fact event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every connected session, sender included
    All,
    /// Every connected session except one
    AllExcept(SessionId),
    /// One session only
    Only(SessionId),
}

impl Audience {
    /// Resolve the audience against the currently connected session ids.
    pub fn resolve(&self, connected: Vec<SessionId>) -> Vec<SessionId> {
        match self {
            Audience::All => connected,
            Audience::AllExcept(excluded) => connected
                .into_iter()
                .filter(|id| id != excluded)
                .collect(),
            Audience::Only(target) => connected
                .into_iter()
                .filter(|id| id == target)
                .collect(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Queue `backlog` on `sender`, then register it as the outbound channel
    /// of a new connection. Nothing broadcast to the session can overtake the
    /// backlog.
    async fn register_with_backlog(
        &self,
        session_id: SessionId,
        sender: PusherChannel,
        backlog: Vec<String>,
    ) -> Result<(), MessagePushError>;

    /// Drop the outbound channel of a closed connection
    async fn unregister_client(&self, session_id: &SessionId);

    /// Push to many sessions; individual failures are tolerated
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
