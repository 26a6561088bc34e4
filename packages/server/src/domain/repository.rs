//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{DisplayName, Member, RepositoryError, Roster, SessionId, Timestamp};

/// Roster Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しません。すべての変更操作は実装側で直列化されます（single-writer）。
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Roster 全体のスナップショットを取得
    async fn get_roster(&self) -> Roster;

    /// メンバーを追加
    async fn add_member(
        &self,
        session_id: SessionId,
        name: DisplayName,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// メンバーを削除（冪等）
    async fn remove_member(&self, session_id: &SessionId);

    /// セッション ID でメンバーを検索
    async fn find_member(&self, session_id: &SessionId) -> Option<Member>;

    /// 接続中の全てのセッション ID を取得
    async fn get_all_session_ids(&self) -> Vec<SessionId>;

    /// 接続中の全メンバーを取得
    async fn get_members(&self) -> Vec<Member>;

    /// 接続中のメンバー数を取得
    async fn count_members(&self) -> usize;
}
