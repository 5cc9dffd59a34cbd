//! UseCase: chat
//!
//! Messages are stamped with the server clock and the sender's current
//! display name, appended to the bounded history and echoed to everyone.

use std::sync::Arc;

use plaza_shared::time::Clock;

use crate::{
    domain::{
        Audience, ChatRecord, MessageContent, MessagePusher, PlazaRepository, SessionId,
        Timestamp,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{
    broadcast::{fan_out, publishing},
    error::IntentError,
};

pub struct SendChatUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        from: &SessionId,
        text: String,
    ) -> Result<ChatRecord, IntentError> {
        let content = MessageContent::new(text)?;
        let time = Timestamp::new(self.clock.now_millis());
        let _publishing = publishing(self.repository.as_ref()).await;
        let record = self.repository.post_chat(from, content, time).await?;

        let event = ServerEvent::PlayerChat(record.clone().into());
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::All,
            &event,
        )
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DomainError, SessionProfile},
        infrastructure::dto::websocket::ChatRecordDto,
        usecase::test_support::{create_test_message_pusher, create_test_repository, join, sid},
    };
    use plaza_shared::time::FixedClock;

    const NOW: i64 = 1_700_000_000_000;

    #[tokio::test]
    async fn test_chat_is_echoed_to_everyone_with_sender_name() {
        // テスト項目: チャットは送信者を含む全員に、送信者名とサーバー時刻付きで届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        repository
            .init_session(
                &sid("a"),
                SessionProfile {
                    name: "Zeynep".to_string().try_into().unwrap(),
                    color: "red".to_string().try_into().unwrap(),
                    character_type: Default::default(),
                    customization: Default::default(),
                    is_driving: false,
                },
            )
            .await
            .unwrap();
        let usecase =
            SendChatUseCase::new(repository.clone(), pusher, Arc::new(FixedClock::new(NOW)));

        // when (操作):
        usecase.execute(&sid("a"), "merhaba".to_string()).await.unwrap();

        // then (期待する結果):
        let expected = ServerEvent::PlayerChat(ChatRecordDto {
            id: "a".to_string(),
            message: "merhaba".to_string(),
            name: "Zeynep".to_string(),
            time: NOW,
        });
        assert_eq!(a.next(), Some(expected.clone()));
        assert_eq!(b.next(), Some(expected));
        assert_eq!(repository.get_chat_history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        // テスト項目: 空のメッセージは履歴に残らず誰にも届かない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let usecase =
            SendChatUseCase::new(repository.clone(), pusher, Arc::new(FixedClock::new(NOW)));

        // when (操作):
        let result = usecase.execute(&sid("a"), String::new()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(IntentError::Rejected(DomainError::InvalidMessageContent))
        );
        assert!(a.drain().is_empty());
        assert!(repository.get_chat_history().await.is_empty());
    }
}
