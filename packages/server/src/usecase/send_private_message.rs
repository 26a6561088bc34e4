//! UseCase: プライベートメッセージ送信処理
//!
//! 宛先セッションと送信者セッションの 2 本のチャンネルにのみ配信します。
//! 他のセッションには一切漏れません。宛先が切断済みの場合、メッセージは
//! 破棄され、送信者にのみエラーが通知されます。

use std::sync::Arc;

use idobata_shared::time::Clock;
use tracing::warn;

use crate::domain::{
    ChatMessage, ClockTime, MessageBody, MessagePusher, RosterRepository, SessionId, ValueError,
};

use super::error::PrivateMessageError;

/// プライベートメッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（送信時刻の刻印）
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
    /// 新しい SendPrivateMessageUseCase を作成
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
    /// 公開メッセージと同様、表示名と時刻はサーバー側で刻印します。
    pub async fn prepare(
        &self,
        sender_id: &SessionId,
        body: String,
    ) -> Result<ChatMessage, PrivateMessageError> {
        let body = MessageBody::new(body).map_err(|e| match e {
            ValueError::EmptyMessage => PrivateMessageError::EmptyMessage,
            other => PrivateMessageError::PushFailed(other.to_string()),
        })?;

        let sender = self
            .repository
            .find_member(sender_id)
            .await
            .ok_or_else(|| PrivateMessageError::UnknownSender(sender_id.as_str().to_string()))?;

        let sent_at = ClockTime::from_millis(self.clock.now_jst_millis());

        Ok(ChatMessage::new(sender.name, body, sent_at))
    }

    /// 宛先セッションと送信者セッションへ配信
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信元セッションの ID
    /// * `recipient_id` - 宛先セッションの ID
    /// * `message` - 配信するシリアライズ済みメッセージ
    ///
    /// # Returns
    ///
    /// * `Err(PrivateMessageError::UnknownRecipient)` - 宛先が接続していない
    pub async fn deliver(
        &self,
        sender_id: &SessionId,
        recipient_id: &SessionId,
        message: &str,
    ) -> Result<(), PrivateMessageError> {
        // 1. 宛先セッションの生存チェック（切断済みならメッセージは破棄）
        if self.repository.find_member(recipient_id).await.is_none() {
            return Err(PrivateMessageError::UnknownRecipient(
                recipient_id.as_str().to_string(),
            ));
        }

        // 2. 宛先へ配信
        self.message_pusher
            .push_to(recipient_id, message)
            .await
            .map_err(|e| PrivateMessageError::PushFailed(e.to_string()))?;

        // 3. 送信者のローカル表示用にエコーバック（失敗しても配信自体は成立）
        if let Err(e) = self.message_pusher.push_to(sender_id, message).await {
            warn!(
                "Failed to echo private message back to sender {}: {}",
                sender_id.as_str(),
                e
            );
        }

        Ok(())
    }

    /// 送信者にのみエラーを通知
    pub async fn notify_sender(&self, sender_id: &SessionId, message: &str) {
        if let Err(e) = self.message_pusher.push_to(sender_id, message).await {
            warn!(
                "Failed to notify sender {} of private delivery error: {}",
                sender_id.as_str(),
                e
            );
        }
    }
}
