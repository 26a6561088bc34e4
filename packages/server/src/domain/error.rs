//! ドメイン層のエラー型定義

use thiserror::Error;

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// セッション ID が空
    #[error("Session ID must not be empty")]
    EmptySessionId,

    /// 表示名が空
    #[error("Display name must not be empty")]
    EmptyDisplayName,

    /// 表示名が長すぎる
    #[error("Display name is too long ({0} chars)")]
    DisplayNameTooLong(usize),

    /// メッセージ本文が空
    #[error("Message body must not be empty")]
    EmptyMessage,
}

/// Roster 集約の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// 同一セッション ID が既に登録されている
    #[error("Session '{0}' is already in the roster")]
    DuplicateSession(String),

    /// 定員超過
    #[error("Roster capacity exceeded")]
    CapacityExceeded,
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 同一セッション ID が既に登録されている
    #[error("Session '{0}' is already registered")]
    DuplicateSession(String),

    /// 定員超過
    #[error("Roster is full")]
    RosterFull,
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のチャンネルが存在しない
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
