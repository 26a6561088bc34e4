//! UseCase: ユーザー接続処理
//!
//! 接続ごとに新しいセッション ID を採番して Roster に登録し、
//! MessagePusher にチャンネルを登録します。表示名の一意性は要求しません。

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{
    DisplayName, Member, MessagePusher, PusherChannel, RepositoryError, RosterRepository,
    SessionId, SessionIdFactory, Timestamp,
};

use super::error::ConnectError;

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（接続時刻の刻印）
    clock: Arc<dyn Clock>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
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

    /// ユーザー接続を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 接続するユーザーの表示名（検証済みの Domain Model）
    /// * `sender` - セッションへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok((SessionId, Timestamp))` - 採番されたセッション ID と接続時刻
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        name: DisplayName,
        sender: PusherChannel,
    ) -> Result<(SessionId, Timestamp), ConnectError> {
        // 1. 接続ごとに新しいセッション ID を採番（生存中の ID は再利用されない）
        let session_id = SessionIdFactory::generate();
        let connected_at = Timestamp::new(self.clock.now_jst_millis());

        // 2. Repository にメンバーを追加
        self.repository
            .add_member(session_id.clone(), name, connected_at)
            .await
            .map_err(|e| match e {
                RepositoryError::RosterFull => ConnectError::RosterFull,
                // UUID v4 採番で重複は起こり得ないが、万一の場合も満員として扱う
                RepositoryError::DuplicateSession(_) => ConnectError::RosterFull,
            })?;

        // 3. MessagePusher にチャンネルを登録
        self.message_pusher
            .register_client(session_id.clone(), sender)
            .await;

        Ok((session_id, connected_at))
    }

    /// プレゼンス一覧を構築
    ///
    /// # Returns
    ///
    /// 接続中のメンバー一覧（表示名 → セッション ID でソート済み）
    pub async fn build_presence_list(&self) -> Vec<Member> {
        let mut members = self.repository.get_members().await;

        // Sort for consistent ordering
        members.sort_by(|a, b| {
            a.name
                .as_str()
                .cmp(b.name.as_str())
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        members
    }

    /// 全セッションへプレゼンス一覧をブロードキャスト
    ///
    /// 接続直後のセッションも対象に含まれます（チャンネルが送出開始まで
    /// メッセージをバッファするため取りこぼしません）。
    pub async fn broadcast_presence(&self, message: &str) -> Result<(), String> {
        let targets = self.repository.get_all_session_ids().await;
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 参加通知を新規セッション以外の全セッションへブロードキャスト
    pub async fn broadcast_joined(
        &self,
        new_session_id: &SessionId,
        message: &str,
    ) -> Result<(), String> {
        let all_ids = self.repository.get_all_session_ids().await;
        let targets: Vec<SessionId> = all_ids
            .into_iter()
            .filter(|id| id != new_session_id)
            .collect();

        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }
}
