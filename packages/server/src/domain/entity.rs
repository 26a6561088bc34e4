//! エンティティ定義

use serde::{Deserialize, Serialize};

use super::value_object::{ClockTime, DisplayName, MessageBody, SessionId, Timestamp};

/// Roster のメンバー（接続中のセッション 1 つに対応）
///
/// プレゼンス一覧はこのエンティティから導出されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// セッション ID
    pub id: SessionId,
    /// 表示名
    pub name: DisplayName,
    /// 接続時刻
    pub connected_at: Timestamp,
}

impl Member {
    pub fn new(id: SessionId, name: DisplayName, connected_at: Timestamp) -> Self {
        Self {
            id,
            name,
            connected_at,
        }
    }
}

/// チャットメッセージ
///
/// 送信時点の表示名と低解像度時刻が刻印され、作成後は不変。
/// 配送が終わればどこにも保存されません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 送信者の表示名（送信時点のもの）
    pub sender: DisplayName,
    /// 本文
    pub body: MessageBody,
    /// 送信時刻（`H:M`）
    pub sent_at: ClockTime,
}

impl ChatMessage {
    pub fn new(sender: DisplayName, body: MessageBody, sent_at: ClockTime) -> Self {
        Self {
            sender,
            body,
            sent_at,
        }
    }
}
