//! UseCase: 公開メッセージ送信処理
//!
//! クライアントが申告した表示名・時刻は信用せず、サーバー側で
//! Roster 上の表示名と現在時刻を刻印し直してから全セッションへ配信します。

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{
    ChatMessage, ClockTime, MessageBody, MessagePusher, RosterRepository, SessionId, ValueError,
};

use super::error::SendMessageError;

/// 公開メッセージ送信のユースケース
pub struct SendPublicMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（送信時刻の刻印）
    clock: Arc<dyn Clock>,
}

impl SendPublicMessageUseCase {
    /// 新しい SendPublicMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 配信用メッセージを構築
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信元セッションの ID
    /// * `body` - メッセージ本文（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 表示名と時刻を刻印済みのメッセージ
    /// * `Err(SendMessageError)` - 本文が空、または送信者が未登録
    pub async fn prepare(
        &self,
        sender_id: &SessionId,
        body: String,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 本文を検証（空メッセージはルーティングしない）
        let body = MessageBody::new(body).map_err(|e| match e {
            ValueError::EmptyMessage => SendMessageError::EmptyMessage,
            other => SendMessageError::BroadcastFailed(other.to_string()),
        })?;

        // 2. 送信者の表示名を Roster から解決（クライアント申告値は使わない）
        let sender = self
            .repository
            .find_member(sender_id)
            .await
            .ok_or_else(|| SendMessageError::UnknownSender(sender_id.as_str().to_string()))?;

        // 3. サーバー時刻を刻印
        let sent_at = ClockTime::from_millis(self.clock.now_jst_millis());

        Ok(ChatMessage::new(sender.name, body, sent_at))
    }

    /// 送信者を含む全セッションへブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配信対象となったセッション ID
    pub async fn broadcast(&self, message: &str) -> Result<Vec<SessionId>, SendMessageError> {
        let targets = self.repository.get_all_session_ids().await;
        self.message_pusher
            .broadcast(targets.clone(), message)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;
        Ok(targets)
    }
}
