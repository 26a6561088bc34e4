//! ドメイン層
//!
//! 値オブジェクト・エンティティ・集約（Roster）と、
//! データアクセス（RosterRepository）/ メッセージ通知（MessagePusher）の
//! インターフェースを定義します。具体的な実装は Infrastructure 層が提供します。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod repository;
pub mod roster;
pub mod value_object;

pub use entity::{ChatMessage, Member};
pub use error::{MessagePushError, RepositoryError, RosterError, ValueError};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::RosterRepository;
pub use roster::Roster;
pub use value_object::{
    ClockTime, DisplayName, MessageBody, SessionId, SessionIdFactory, Timestamp,
};

#[cfg(test)]
pub use pusher::MockMessagePusher;
