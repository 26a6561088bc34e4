//! UseCase: ユーザー切断処理
//!
//! Roster からの削除・チャンネルの登録解除と、残存セッションへの
//! 通知対象選定を行います。切断はトランスポート断でも明示的な切断でも
//! 同じ経路を通ります。

use std::sync::Arc;

use crate::domain::{DisplayName, MessagePusher, RosterRepository, SessionId};

use super::error::DisconnectError;

/// ユーザー切断のユースケース
pub struct DisconnectUserUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ユーザー切断を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断するセッションの ID
    ///
    /// # Returns
    ///
    /// * `Ok((DisplayName, Vec<SessionId>))` - 切断したユーザーの表示名と通知対象
    /// * `Err(DisconnectError)` - セッションが存在しない場合
    pub async fn execute(
        &self,
        session_id: SessionId,
    ) -> Result<(DisplayName, Vec<SessionId>), DisconnectError> {
        // 1. セッションが存在するかチェック
        let member = self
            .repository
            .find_member(&session_id)
            .await
            .ok_or_else(|| DisconnectError::UnknownSession(session_id.as_str().to_string()))?;

        // 2. 通知対象を取得（切断するセッション以外の全セッション）
        let notify_targets = self.get_notify_targets(&session_id).await;

        // 3. Repository からメンバーを削除
        self.repository.remove_member(&session_id).await;

        // 4. MessagePusher からチャンネルを登録解除
        self.message_pusher.unregister_client(&session_id).await;

        Ok((member.name, notify_targets))
    }

    /// 通知対象のセッション ID リストを取得
    async fn get_notify_targets(&self, exclude_session_id: &SessionId) -> Vec<SessionId> {
        let all_ids = self.repository.get_all_session_ids().await;
        all_ids
            .into_iter()
            .filter(|id| id != exclude_session_id)
            .collect()
    }

    /// 退出通知を残存セッションへブロードキャスト
    pub async fn broadcast_left(
        &self,
        target_ids: Vec<SessionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(target_ids, message)
            .await
            .map_err(|e| e.to_string())
    }
}
