//! UseCase: stateless relays
//!
//! Tic-tac-toe moves and voice negotiation are forwarded without touching
//! the plaza state. Board contents are never stored; voice signals are
//! opaque and delivered to their named target only.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{Audience, DomainError, MessagePusher, PlazaRepository, SessionId, XoxMove},
    infrastructure::dto::websocket::{ServerEvent, VoiceReadyPayload, VoiceSignalRelayPayload},
};

use super::{broadcast::fan_out, error::IntentError};

pub struct RelayUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Forward a validated move as `xox-update` to every other session.
    pub async fn xox_move(
        &self,
        sender: &SessionId,
        movement: XoxMove,
    ) -> Result<(), IntentError> {
        self.ensure_connected(sender).await?;
        self.relay(
            Audience::AllExcept(sender.clone()),
            ServerEvent::XoxUpdate(movement.into()),
        )
        .await
    }

    /// Announce that `sender` is ready to negotiate voice links.
    pub async fn voice_join(&self, sender: &SessionId) -> Result<(), IntentError> {
        self.ensure_connected(sender).await?;
        self.relay(
            Audience::AllExcept(sender.clone()),
            ServerEvent::VoiceReady(VoiceReadyPayload {
                id: sender.to_string(),
            }),
        )
        .await
    }

    /// Forward an offer/answer/candidate envelope to `target_id` only.
    pub async fn voice_signal(
        &self,
        sender: &SessionId,
        target_id: String,
        signal: Value,
    ) -> Result<(), IntentError> {
        self.ensure_connected(sender).await?;
        let target = SessionId::new(target_id)?;
        self.ensure_connected(&target).await?;
        self.relay(
            Audience::Only(target),
            ServerEvent::VoiceSignal(VoiceSignalRelayPayload {
                sender_id: sender.to_string(),
                signal,
            }),
        )
        .await
    }

    async fn ensure_connected(&self, id: &SessionId) -> Result<(), IntentError> {
        match self.repository.get_session(id).await {
            Some(_) => Ok(()),
            None => Err(DomainError::SessionNotFound(id.to_string()).into()),
        }
    }

    async fn relay(&self, audience: Audience, event: ServerEvent) -> Result<(), IntentError> {
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            audience,
            &event,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BoardId, CellIndex, Symbol, message_pusher::MockMessagePusher},
        infrastructure::dto::websocket::XoxMovePayload,
        usecase::test_support::{create_test_message_pusher, create_test_repository, join, sid},
    };
    use serde_json::json;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 三目並べと音声シグナリングの中継先
    //
    // 【どのようなシナリオをテストするか】
    // 1. xox-move は送信者以外に xox-update として届く
    // 2. voice-join は送信者以外に voice-ready として届く
    // 3. voice-signal は指定したターゲットだけに届き、中身は変更されない
    // 4. 存在しないターゲットへのシグナルは拒否される
    // ========================================

    #[tokio::test]
    async fn test_xox_move_is_relayed_to_others() {
        // テスト項目: 三目並べの手が送信者以外に中継される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = RelayUseCase::new(repository, pusher);
        let movement = XoxMove {
            board_id: BoardId::new("board-1".to_string()).unwrap(),
            index: CellIndex::new(4).unwrap(),
            symbol: Symbol::X,
        };

        // when (操作):
        usecase.xox_move(&sid("a"), movement).await.unwrap();

        // then (期待する結果):
        assert!(a.drain().is_empty());
        assert_eq!(
            b.next(),
            Some(ServerEvent::XoxUpdate(XoxMovePayload {
                board_id: "board-1".to_string(),
                index: 4,
                symbol: "X".to_string(),
            }))
        );
    }

    #[tokio::test]
    async fn test_voice_join_announces_readiness_to_others() {
        // テスト項目: voice-join は送信者以外に voice-ready として届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = RelayUseCase::new(repository, pusher);

        // when (操作):
        usecase.voice_join(&sid("a")).await.unwrap();

        // then (期待する結果):
        assert!(a.drain().is_empty());
        assert_eq!(
            b.next(),
            Some(ServerEvent::VoiceReady(VoiceReadyPayload {
                id: "a".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn test_voice_signal_reaches_target_only() {
        // テスト項目: シグナルは指定したターゲットだけに、中身を変えずに届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let mut c = join(&repository, &pusher, "c").await;
        let usecase = RelayUseCase::new(repository, pusher);
        let signal = json!({"type": "offer", "sdp": "v=0"});

        // when (操作):
        usecase
            .voice_signal(&sid("a"), "c".to_string(), signal.clone())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(a.drain().is_empty());
        assert!(b.drain().is_empty());
        assert_eq!(
            c.next(),
            Some(ServerEvent::VoiceSignal(VoiceSignalRelayPayload {
                sender_id: "a".to_string(),
                signal,
            }))
        );
    }

    #[tokio::test]
    async fn test_voice_signal_to_unknown_target_is_rejected() {
        // テスト項目: 存在しないターゲットへのシグナルは送信されない
        // given (前提条件):
        let repository = create_test_repository();
        let channels = create_test_message_pusher();
        let _a = join(&repository, &channels, "a").await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let usecase = RelayUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .voice_signal(&sid("a"), "nobody".to_string(), json!(null))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(IntentError::Rejected(DomainError::SessionNotFound(
                "nobody".to_string()
            )))
        );
    }
}
