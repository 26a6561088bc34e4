//! UseCase 層のエラー型定義

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Roster の定員超過
    #[error("Roster is full")]
    RosterFull,
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    /// セッションが存在しない
    #[error("Session '{0}' is not registered")]
    UnknownSession(String),
}

/// 公開メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// 空メッセージ（ルーティング前に破棄）
    #[error("Empty message is never routed")]
    EmptyMessage,

    /// 送信者セッションが存在しない
    #[error("Sender session '{0}' is not registered")]
    UnknownSender(String),

    /// ブロードキャスト失敗
    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// プライベートメッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivateMessageError {
    /// 空メッセージ（ルーティング前に破棄）
    #[error("Empty message is never routed")]
    EmptyMessage,

    /// 送信者セッションが存在しない
    #[error("Sender session '{0}' is not registered")]
    UnknownSender(String),

    /// 宛先セッションが接続していない（メッセージは破棄される）
    #[error("Recipient '{0}' is not connected")]
    UnknownRecipient(String),

    /// 宛先チャンネルへの送信失敗
    #[error("Failed to push private message: {0}")]
    PushFailed(String),
}

/// プライベートチャット開始通知のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivateChatError {
    /// 相手セッションが接続していない
    #[error("Target '{0}' is not connected")]
    UnknownTarget(String),

    /// 通知の送信失敗
    #[error("Failed to push notification: {0}")]
    PushFailed(String),
}
