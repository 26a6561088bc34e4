//! WebSocket イベントの DTO 定義
//!
//! ワイヤフォーマットは `{"type": "...", ...}` のタグ付き JSON です。
//! イベント名の表記（kebab-case / camelCase の混在）は既存クライアントとの
//! 互換性のために固定されています。変更しないでください。

use serde::{Deserialize, Serialize};

/// チャットメッセージの DTO
///
/// 公開・プライベートの両方で同じ形を使います。
/// サーバー → クライアント方向では `user` と `time` はサーバーが刻印した値です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    /// 送信者の表示名
    pub user: String,
    /// メッセージ本文
    pub msg: String,
    /// 送信時刻（"H:M" 形式、ゼロ埋めなし）
    pub time: String,
}

/// プレゼンス一覧の 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntryDto {
    /// セッション ID
    pub id: String,
    /// 表示名
    pub name: String,
}

/// クライアント → サーバーのイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// 公開メッセージ送信
    ///
    /// クライアントが申告する `user` / `time` はサーバー側で無視され、
    /// Roster 上の表示名とサーバー時刻で上書きされます。
    #[serde(rename = "send-message")]
    SendMessage {
        user: String,
        msg: String,
        time: String,
    },

    /// プライベートメッセージ送信
    #[serde(rename = "private-message")]
    PrivateMessage {
        /// 宛先セッションの ID
        to: String,
        /// メッセージ本文
        message: String,
    },

    /// プライベートチャット開始通知
    #[serde(rename = "start-private-chat")]
    StartPrivateChat {
        /// 相手セッションの ID
        target: String,
    },

    /// タイピング状態の更新
    #[serde(rename = "userTyping")]
    UserTyping {
        #[serde(rename = "isTyping")]
        is_typing: bool,
        /// クライアントが申告する表示名（サーバー側では無視される）
        user: String,
    },
}

/// サーバー → クライアントのイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// 公開メッセージの配信
    #[serde(rename = "receive-msg")]
    ReceiveMsg {
        user: String,
        msg: String,
        time: String,
    },

    /// プライベートメッセージの配信（宛先と送信者のみ）
    #[serde(rename = "private-message")]
    PrivateMessage {
        user: String,
        msg: String,
        time: String,
    },

    /// プライベートチャット開始通知（相手のみ）
    #[serde(rename = "private-chat-started")]
    PrivateChatStarted {
        /// 開始した側のセッション ID
        initiator: String,
    },

    /// プライベート配信の失敗通知（送信者のみ）
    #[serde(rename = "private-error")]
    PrivateError {
        /// 届かなかった宛先セッションの ID
        to: String,
        /// 失敗理由
        reason: String,
    },

    /// プレゼンス一覧の更新（全セッション）
    #[serde(rename = "updateUsers")]
    UpdateUsers { users: Vec<PresenceEntryDto> },

    /// 参加通知（新規セッション以外）
    #[serde(rename = "userConnected")]
    UserConnected { user: String },

    /// 退出通知（残存セッション）
    #[serde(rename = "userDisconnected")]
    UserDisconnected { user: String },

    /// タイピング中一覧の更新（全セッション）
    #[serde(rename = "updateTypingUsers")]
    UpdateTypingUsers { users: Vec<String> },
}
