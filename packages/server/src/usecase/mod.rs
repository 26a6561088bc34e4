//! UseCase 層
//!
//! 受信イベント 1 種類につき 1 つのユースケースを定義します。
//! Repository / MessagePusher の trait にのみ依存します。

mod connect_user;
mod disconnect_user;
mod error;
mod send_private_message;
mod send_public_message;
mod start_private_chat;
mod typing_tracker;

pub use connect_user::ConnectUserUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{
    ConnectError, DisconnectError, PrivateChatError, PrivateMessageError, SendMessageError,
};
pub use send_private_message::SendPrivateMessageUseCase;
pub use send_public_message::SendPublicMessageUseCase;
pub use start_private_chat::StartPrivateChatUseCase;
pub use typing_tracker::{TYPING_EXPIRY, TypingListEncoder, TypingTracker};
