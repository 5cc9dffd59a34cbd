//! UseCase: player identity, appearance and movement
//!
//! - `init`: overwrite display fields, announce arrival to everyone else
//! - `change`: single-field change (world, color, vehicle, archetype),
//!   echoed to everyone including the sender
//! - `move_player`: position/rotation/world pass-through to everyone else

use std::sync::Arc;

use crate::{
    domain::{
        Audience, MessagePusher, Movement, PlazaRepository, Session, SessionChange, SessionId,
        SessionProfile,
    },
    infrastructure::dto::{
        conversion::player_updated,
        websocket::{PlayerJoinedPayload, PlayerMovedPayload, ServerEvent},
    },
};

use super::{
    broadcast::{fan_out, publishing},
    error::IntentError,
};

pub struct UpdatePlayerUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdatePlayerUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Apply the client's chosen identity and broadcast `player-joined` to
    /// every other session.
    pub async fn init(
        &self,
        id: &SessionId,
        profile: SessionProfile,
    ) -> Result<Session, IntentError> {
        let _publishing = publishing(self.repository.as_ref()).await;
        let session = self.repository.init_session(id, profile).await?;

        let event = ServerEvent::PlayerJoined(PlayerJoinedPayload {
            id: id.as_str().to_string(),
            data: session.clone().into(),
        });
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::AllExcept(id.clone()),
            &event,
        )
        .await?;

        Ok(session)
    }

    /// Apply a single-field change and broadcast `player-updated` to all.
    pub async fn change(&self, id: &SessionId, change: SessionChange) -> Result<(), IntentError> {
        let _publishing = publishing(self.repository.as_ref()).await;
        self.repository.apply_change(id, &change).await?;

        let event = ServerEvent::PlayerUpdated(player_updated(id, &change));
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::All,
            &event,
        )
        .await?;
        Ok(())
    }

    /// Store the claimed movement and broadcast `player-moved` to every
    /// other session. No bounds or speed checks.
    pub async fn move_player(&self, id: &SessionId, movement: Movement) -> Result<(), IntentError> {
        let _publishing = publishing(self.repository.as_ref()).await;
        self.repository.move_session(id, movement).await?;

        let event = ServerEvent::PlayerMoved(PlayerMovedPayload {
            id: id.as_str().to_string(),
            position: movement.position.to_array(),
            rotation: movement.rotation.to_array(),
            world: movement.world.as_str().to_string(),
        });
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::AllExcept(id.clone()),
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
        domain::{
            CharacterType, Color, Customization, DisplayName, DomainError, Vec3, World,
            message_pusher::MockMessagePusher,
        },
        usecase::test_support::{create_test_message_pusher, create_test_repository, join, sid},
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - init / change / move_player の状態更新とブロードキャスト対象
    //
    // 【どのようなシナリオをテストするか】
    // 1. init は送信者以外に player-joined を送る
    // 2. change は送信者を含む全員に player-updated を送る
    // 3. move は送信者以外に player-moved を送る
    // 4. 存在しないセッションからの操作は何も送らない
    // ========================================

    fn profile(name: &str, color: &str) -> SessionProfile {
        SessionProfile {
            name: DisplayName::new(name.to_string()).unwrap(),
            color: Color::new(color.to_string()).unwrap(),
            character_type: CharacterType::Mother,
            customization: Customization::new(),
            is_driving: false,
        }
    }

    #[tokio::test]
    async fn test_init_announces_arrival_to_others_only() {
        // テスト項目: init は送信者以外に player-joined を送る
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = UpdatePlayerUseCase::new(repository.clone(), pusher);

        // when (操作):
        let session = usecase.init(&sid("a"), profile("Zeynep", "red")).await.unwrap();

        // then (期待する結果):
        assert_eq!(session.name.as_str(), "Zeynep");
        assert!(a.drain().is_empty());
        match b.next() {
            Some(ServerEvent::PlayerJoined(joined)) => {
                assert_eq!(joined.id, "a");
                assert_eq!(joined.data.color, "red");
                assert_eq!(joined.data.character_type, "mother");
            }
            other => panic!("expected player-joined, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_change_is_echoed_to_everyone() {
        // テスト項目: 単一フィールドの変更は送信者を含む全員に送られる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = UpdatePlayerUseCase::new(repository.clone(), pusher);

        // when (操作):
        usecase
            .change(&sid("a"), SessionChange::World(World::Town))
            .await
            .unwrap();

        // then (期待する結果):
        for inbox in [&mut a, &mut b] {
            match inbox.next() {
                Some(ServerEvent::PlayerUpdated(update)) => {
                    assert_eq!(update.id, "a");
                    assert_eq!(update.world.as_deref(), Some("town"));
                }
                other => panic!("expected player-updated, got {other:?}"),
            }
        }
        let stored = repository.get_session(&sid("a")).await.unwrap();
        assert_eq!(stored.world, World::Town);
    }

    #[tokio::test]
    async fn test_move_is_relayed_to_others() {
        // テスト項目: 移動は送信者以外にそのまま中継される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = UpdatePlayerUseCase::new(repository.clone(), pusher);
        let movement = Movement {
            position: Vec3::new(100.0, 0.0, -3.5).unwrap(),
            rotation: Vec3::new(0.0, 1.0, 0.0).unwrap(),
            world: World::Race,
        };

        // when (操作):
        usecase.move_player(&sid("a"), movement).await.unwrap();

        // then (期待する結果):
        assert!(a.drain().is_empty());
        assert_eq!(
            b.next(),
            Some(ServerEvent::PlayerMoved(PlayerMovedPayload {
                id: "a".to_string(),
                position: [100.0, 0.0, -3.5],
                rotation: [0.0, 1.0, 0.0],
                world: "race".to_string(),
            }))
        );
        let stored = repository.get_session(&sid("a")).await.unwrap();
        assert_eq!(stored.position, movement.position);
    }

    #[tokio::test]
    async fn test_unknown_session_is_silently_rejected() {
        // テスト項目: 存在しないセッションからの操作はブロードキャストされない
        // given (前提条件):
        let repository = create_test_repository();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let usecase = UpdatePlayerUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .change(&sid("ghost"), SessionChange::Driving(true))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(IntentError::Rejected(DomainError::SessionNotFound(
                "ghost".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_move_targets_exclude_sender() {
        // テスト項目: 移動のブロードキャスト対象に送信者が含まれない
        // given (前提条件):
        let repository = create_test_repository();
        let channels = create_test_message_pusher();
        let _a = join(&repository, &channels, "a").await;
        let _b = join(&repository, &channels, "b").await;
        let _c = join(&repository, &channels, "c").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, content| {
                targets.len() == 2
                    && !targets.contains(&sid("a"))
                    && content.contains("player-moved")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = UpdatePlayerUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .move_player(
                &sid("a"),
                Movement {
                    position: Vec3::default(),
                    rotation: Vec3::default(),
                    world: World::Hub,
                },
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
