//! Helpers shared by the use case tests.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{MessagePusher, Plaza, PlazaLimits, PlazaRepository, Session, SessionId, Vec3},
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryPlazaRepository,
    },
};

pub(crate) fn sid(value: &str) -> SessionId {
    SessionId::new(value.to_string()).unwrap()
}

pub(crate) fn create_test_repository() -> Arc<InMemoryPlazaRepository> {
    let plaza = Arc::new(Mutex::new(Plaza::new(PlazaLimits::default())));
    Arc::new(InMemoryPlazaRepository::new(plaza))
}

pub(crate) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))))
}

/// Receiving end of one connected test session.
pub(crate) struct Inbox(mpsc::UnboundedReceiver<String>);

impl Inbox {
    /// Next pushed event, or `None` if nothing is queued.
    pub(crate) fn next(&mut self) -> Option<ServerEvent> {
        self.0
            .try_recv()
            .ok()
            .map(|json| serde_json::from_str(&json).unwrap())
    }

    /// Drain and return every queued event.
    pub(crate) fn drain(&mut self) -> Vec<ServerEvent> {
        std::iter::from_fn(|| self.next()).collect()
    }
}

/// Add a session to the repository and register its channel with the pusher.
pub(crate) async fn join(
    repository: &Arc<InMemoryPlazaRepository>,
    pusher: &Arc<WebSocketMessagePusher>,
    id: &str,
) -> Inbox {
    let (tx, rx) = mpsc::unbounded_channel();
    repository
        .add_session(Session::new(sid(id), Vec3::default()))
        .await;
    pusher
        .register_with_backlog(sid(id), tx, Vec::new())
        .await
        .unwrap();
    Inbox(rx)
}
