//! DTO とドメインモデルの変換ロジック

use idobata_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{ChatMessage, Member};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Model → DTO
// ========================================

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            user: model.sender.into_string(),
            msg: model.body.into_string(),
            time: model.sent_at.into_string(),
        }
    }
}

impl From<Member> for dto::PresenceEntryDto {
    fn from(model: Member) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
        }
    }
}

impl From<Member> for http::PresenceDetailDto {
    fn from(model: Member) -> Self {
        Self {
            connected_at: timestamp_to_jst_rfc3339(model.connected_at.value()),
            id: model.id.into_string(),
            name: model.name.into_string(),
        }
    }
}

// ========================================
// ServerEvent の構築ヘルパー
// ========================================

impl dto::ServerEvent {
    /// 公開メッセージ配信イベントを構築
    pub fn receive_msg(message: ChatMessage) -> Self {
        let dto = dto::ChatMessageDto::from(message);
        Self::ReceiveMsg {
            user: dto.user,
            msg: dto.msg,
            time: dto.time,
        }
    }

    /// プライベートメッセージ配信イベントを構築
    pub fn private_message(message: ChatMessage) -> Self {
        let dto = dto::ChatMessageDto::from(message);
        Self::PrivateMessage {
            user: dto.user,
            msg: dto.msg,
            time: dto.time,
        }
    }

    /// プレゼンス一覧更新イベントを構築
    pub fn update_users(members: Vec<Member>) -> Self {
        Self::UpdateUsers {
            users: members
                .into_iter()
                .map(dto::PresenceEntryDto::from)
                .collect(),
        }
    }

    /// タイピング中一覧更新イベントを構築
    pub fn update_typing_users(names: Vec<String>) -> Self {
        Self::UpdateTypingUsers { users: names }
    }
}
