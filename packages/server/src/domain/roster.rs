//! Roster 集約
//!
//! 「いま誰がオンラインか」の唯一の情報源。接続中のメンバーを保持し、
//! セッション ID の重複と定員超過を拒否します。メッセージ履歴は
//! 持ちません（配送後の永続化はスコープ外）。

use serde::Serialize;

use super::entity::Member;
use super::error::RosterError;
use super::value_object::{SessionId, Timestamp};

/// デフォルトの定員
pub const DEFAULT_CAPACITY: usize = 100;

/// 接続中メンバーの集約
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    /// 作成時刻
    pub created_at: Timestamp,
    /// 定員
    capacity: usize,
    /// 接続中のメンバー
    pub members: Vec<Member>,
}

impl Roster {
    /// デフォルト定員で Roster を作成
    pub fn new(created_at: Timestamp) -> Self {
        Self::with_capacity(created_at, DEFAULT_CAPACITY)
    }

    /// 定員を指定して Roster を作成
    pub fn with_capacity(created_at: Timestamp, capacity: usize) -> Self {
        Self {
            created_at,
            capacity,
            members: Vec::new(),
        }
    }

    /// メンバーを追加
    ///
    /// 同一セッション ID の重複と定員超過はエラー。表示名の重複は許容します。
    pub fn add_member(&mut self, member: Member) -> Result<(), RosterError> {
        if self.members.iter().any(|m| m.id == member.id) {
            return Err(RosterError::DuplicateSession(
                member.id.as_str().to_string(),
            ));
        }
        if self.members.len() >= self.capacity {
            return Err(RosterError::CapacityExceeded);
        }
        self.members.push(member);
        Ok(())
    }

    /// メンバーを削除（存在しない場合は何もしない・冪等）
    pub fn remove_member(&mut self, session_id: &SessionId) {
        self.members.retain(|m| &m.id != session_id);
    }

    /// セッション ID でメンバーを検索
    pub fn find(&self, session_id: &SessionId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == session_id)
    }

    /// メンバーが存在するか
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.find(session_id).is_some()
    }

    /// 接続中のメンバー数
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
