//! UseCase: quiz scoring
//!
//! The client reports how many points it earned. The claim is trusted as
//! long as it is within the accepted range; the new leaderboard and a
//! notification naming the solver go out to everyone.

use std::sync::Arc;

use crate::{
    domain::{Audience, MessagePusher, PlazaRepository, Points, ScoreAward, SessionId},
    infrastructure::dto::websocket::{MathNotificationPayload, ServerEvent},
};

use super::{
    broadcast::{fan_out, publishing},
    error::IntentError,
};

pub struct SolveMathUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SolveMathUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Emits `leaderboard-update` followed by `math-notification`.
    pub async fn execute(&self, id: &SessionId, points: u32) -> Result<ScoreAward, IntentError> {
        let points = Points::new(points)?;
        let _publishing = publishing(self.repository.as_ref()).await;
        let (award, leaderboard) = self.repository.add_score(id, points).await?;

        let events = [
            ServerEvent::LeaderboardUpdate(leaderboard.into_iter().map(Into::into).collect()),
            ServerEvent::MathNotification(MathNotificationPayload {
                id: award.id.to_string(),
                name: award.name.as_str().to_string(),
                points: award.points,
            }),
        ];
        for event in &events {
            fan_out(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                Audience::All,
                event,
            )
            .await?;
        }

        Ok(award)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DomainError, message_pusher::MockMessagePusher},
        infrastructure::dto::websocket::LeaderboardEntryDto,
        usecase::test_support::{create_test_message_pusher, create_test_repository, join, sid},
    };

    #[tokio::test]
    async fn test_score_accumulates_and_is_announced() {
        // テスト項目: 得点が加算され、リーダーボードと通知が全員に届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut a = join(&repository, &pusher, "a").await;
        let mut b = join(&repository, &pusher, "b").await;
        let usecase = SolveMathUseCase::new(repository.clone(), pusher);

        // when (操作):
        usecase.execute(&sid("a"), 30).await.unwrap();
        let award = usecase.execute(&sid("a"), 20).await.unwrap();

        // then (期待する結果):
        assert_eq!(award.total, 50);
        assert_eq!(award.points, 20);
        let events = b.drain();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            ServerEvent::LeaderboardUpdate(vec![LeaderboardEntryDto {
                id: "a".to_string(),
                name: "Guest".to_string(),
                score: 50,
            }])
        );
        assert_eq!(
            events[3],
            ServerEvent::MathNotification(MathNotificationPayload {
                id: "a".to_string(),
                name: "Guest".to_string(),
                points: 20,
            })
        );
        assert_eq!(a.drain().len(), 4);
    }

    #[tokio::test]
    async fn test_out_of_range_points_are_rejected_before_any_push() {
        // テスト項目: 範囲外の得点は拒否され、何も送信されない
        // given (前提条件):
        let repository = create_test_repository();
        let channels = create_test_message_pusher();
        let _a = join(&repository, &channels, "a").await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let usecase = SolveMathUseCase::new(repository.clone(), Arc::new(pusher));

        // when (操作):
        let zero = usecase.execute(&sid("a"), 0).await;
        let huge = usecase.execute(&sid("a"), 1_000_000).await;

        // then (期待する結果):
        assert_eq!(zero, Err(IntentError::Rejected(DomainError::InvalidPoints(0))));
        assert_eq!(
            huge,
            Err(IntentError::Rejected(DomainError::InvalidPoints(1_000_000)))
        );
        assert!(repository.get_leaderboard().await.is_empty());
    }
}
