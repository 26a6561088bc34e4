//! HTTP API レスポンスの DTO 定義

use serde::{Deserialize, Serialize};

/// プレゼンス詳細の 1 エントリ（HTTP API 用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceDetailDto {
    /// セッション ID
    pub id: String,
    /// 表示名
    pub name: String,
    /// 接続時刻（RFC 3339 形式、JST）
    pub connected_at: String,
}

/// プレゼンス一覧のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceResponse {
    /// 接続中のセッション数
    pub count: usize,
    /// 接続中のメンバー一覧
    pub members: Vec<PresenceDetailDto>,
}
