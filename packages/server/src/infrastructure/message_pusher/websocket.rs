//! WebSocket-backed MessagePusher
//!
//! Holds the outbound `UnboundedSender` of every live connection. The UI layer
//! creates the channel when a socket is upgraded and drains the receiver into
//! the socket; this type only routes serialized facts to the right senders.
//!
//! A send to a connection whose receiver has already gone away fails
//! silently during broadcast: the socket is closing and its session will be
//! removed by the disconnect path.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

pub struct WebSocketMessagePusher {
    /// Key: session id, Value: outbound channel
    clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_with_backlog(
        &self,
        session_id: SessionId,
        sender: PusherChannel,
        backlog: Vec<String>,
    ) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;

        for frame in backlog {
            sender
                .send(frame)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        }
        clients.insert(session_id.clone(), sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
        Ok(())
    }

    async fn unregister_client(&self, session_id: &SessionId) {
        self.clients.lock().await.remove(session_id);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to session '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::debug!("Session '{}' not registered, skipping", target);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register_with_backlog: バックログを先に積んでから登録
    // - broadcast: 複数セッションへの送信（部分的な失敗を許容）
    // - register / unregister の反映
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn sid(value: &str) -> SessionId {
        SessionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_queues_backlog_before_broadcasts() {
        // テスト項目: 登録時のバックログは、その後のブロードキャストより先に届く
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = pusher
            .register_with_backlog(sid("alice"), tx, vec!["one".into(), "two".into()])
            .await;
        pusher.broadcast(vec![sid("alice")], "live").await.unwrap();

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(clients.lock().await.contains_key(&sid("alice")));
        assert_eq!(rx.recv().await, Some("one".to_string()));
        assert_eq!(rx.recv().await, Some("two".to_string()));
        assert_eq!(rx.recv().await, Some("live".to_string()));
    }

    #[tokio::test]
    async fn test_register_with_closed_receiver_fails() {
        // テスト項目: 受信側が閉じたチャネルはバックログ送信に失敗し、登録されない
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = pusher
            .register_with_backlog(sid("alice"), tx, vec!["one".into()])
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
        assert!(clients.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部のセッションが存在しなくてもブロードキャストは成功する
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher
            .register_with_backlog(sid("alice"), tx1, Vec::new())
            .await
            .unwrap();
        pusher
            .register_with_backlog(sid("bob"), tx2, Vec::new())
            .await
            .unwrap();

        // when (操作):
        let result = pusher
            .broadcast(vec![sid("alice"), sid("ghost"), sid("bob")], "Broadcast")
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_client() {
        // テスト項目: 登録解除したセッションはマップから削除される
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher
            .register_with_backlog(sid("alice"), tx, Vec::new())
            .await
            .unwrap();

        // when (操作):
        pusher.unregister_client(&sid("alice")).await;

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
    }
}
