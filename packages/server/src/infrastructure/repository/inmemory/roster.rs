//! InMemory Roster Repository 実装
//!
//! ドメイン層が定義する RosterRepository trait の具体的な実装。
//! Roster ドメインモデルをそのままインメモリのストレージとして使用します。
//!
//! 永続化バックエンド（PostgreSQL など）を追加する場合は
//! DB Row → DTO → Roster の変換層が必要になります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, Member, RepositoryError, Roster, RosterError, RosterRepository, SessionId,
    Timestamp,
};

/// インメモリ Roster Repository 実装
///
/// Roster ドメインモデルを保持し、ドメイン層の RosterRepository trait を実装します（依存性の逆転）。
pub struct InMemoryRosterRepository {
    /// Roster ドメインモデル
    roster: Arc<Mutex<Roster>>,
}

impl InMemoryRosterRepository {
    /// 新しい InMemoryRosterRepository を作成
    pub fn new(roster: Arc<Mutex<Roster>>) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn get_roster(&self) -> Roster {
        let roster = self.roster.lock().await;
        roster.clone()
    }

    async fn add_member(
        &self,
        session_id: SessionId,
        name: DisplayName,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let member = Member::new(session_id.clone(), name, connected_at);

        let mut roster = self.roster.lock().await;
        roster.add_member(member).map_err(|e| match e {
            RosterError::CapacityExceeded => RepositoryError::RosterFull,
            RosterError::DuplicateSession(id) => RepositoryError::DuplicateSession(id),
        })?;

        Ok(())
    }

    async fn remove_member(&self, session_id: &SessionId) {
        let mut roster = self.roster.lock().await;
        roster.remove_member(session_id);
    }

    async fn find_member(&self, session_id: &SessionId) -> Option<Member> {
        let roster = self.roster.lock().await;
        roster.find(session_id).cloned()
    }

    async fn get_all_session_ids(&self) -> Vec<SessionId> {
        let roster = self.roster.lock().await;
        roster.members.iter().map(|m| m.id.clone()).collect()
    }

    async fn get_members(&self) -> Vec<Member> {
        let roster = self.roster.lock().await;
        roster.members.clone()
    }

    async fn count_members(&self) -> usize {
        let roster = self.roster.lock().await;
        roster.len()
    }
}
