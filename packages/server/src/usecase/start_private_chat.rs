//! UseCase: プライベートチャット開始通知
//!
//! 相手セッションに開始通知を届けるだけの勧告的な操作です。
//! サーバー側にセッション状態は作られず、以降のプライベートメッセージの
//! 可否にも影響しません。

use std::sync::Arc;

use crate::domain::{MessagePusher, RosterRepository, SessionId};

use super::error::PrivateChatError;

/// プライベートチャット開始のユースケース
pub struct StartPrivateChatUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartPrivateChatUseCase {
    /// 新しい StartPrivateChatUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 開始通知を相手セッションへ送信
    ///
    /// # Arguments
    ///
    /// * `target_id` - 通知する相手セッションの ID
    /// * `message` - シリアライズ済みの開始通知
    pub async fn execute(
        &self,
        target_id: &SessionId,
        message: &str,
    ) -> Result<(), PrivateChatError> {
        // 相手セッションの生存チェック（切断済みなら通知は破棄）
        if self.repository.find_member(target_id).await.is_none() {
            return Err(PrivateChatError::UnknownTarget(
                target_id.as_str().to_string(),
            ));
        }

        self.message_pusher
            .push_to(target_id, message)
            .await
            .map_err(|e| PrivateChatError::PushFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Roster, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository,
        },
        usecase::ConnectUserUseCase,
    };
    use idobata_shared::time::FixedClock;
    use tokio::sync::Mutex;

    struct Fixture {
        connect: ConnectUserUseCase,
        start_chat: StartPrivateChatUseCase,
    }

    fn create_fixture() -> Fixture {
        let roster = Arc::new(Mutex::new(Roster::new(Timestamp::new(0))));
        let repository = Arc::new(InMemoryRosterRepository::new(roster));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        Fixture {
            connect: ConnectUserUseCase::new(
                repository.clone(),
                pusher.clone(),
                Arc::new(FixedClock::new(1000)),
            ),
            start_chat: StartPrivateChatUseCase::new(repository, pusher),
        }
    }

    fn display_name(name: &str) -> DisplayName {
        DisplayName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_notification_reaches_only_target() {
        // テスト項目: 開始通知が相手セッションのみに届く
        // given (前提条件):
        let f = create_fixture();
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        let (_alice, _) = f.connect.execute(display_name("Alice"), tx1).await.unwrap();
        let (bob, _) = f.connect.execute(display_name("Bob"), tx2).await.unwrap();

        // when (操作): Alice が Bob とのチャット開始を通知
        let result = f.start_chat.execute(&bob, "invitation").await;

        // then (期待する結果): Bob のみ受信
        assert!(result.is_ok());
        assert_eq!(rx2.recv().await, Some("invitation".to_string()));
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_notification_to_disconnected_target_fails() {
        // テスト項目: 切断済みの相手への開始通知がエラーになる
        // given (前提条件):
        let f = create_fixture();
        let ghost = SessionId::new("ghost".to_string()).unwrap();

        // when (操作):
        let result = f.start_chat.execute(&ghost, "invitation").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PrivateChatError::UnknownTarget("ghost".to_string()))
        );
    }
}
