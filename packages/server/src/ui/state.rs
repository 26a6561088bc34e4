//! Server state and connection management.

use std::sync::Arc;

use crate::{
    domain::RosterRepository,
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, SendPrivateMessageUseCase,
        SendPublicMessageUseCase, StartPrivateChatUseCase, TypingTracker,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectUserUseCase（ユーザー接続のユースケース）
    pub connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（ユーザー切断のユースケース）
    pub disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// SendPublicMessageUseCase（公開メッセージ送信のユースケース）
    pub send_public_message_usecase: Arc<SendPublicMessageUseCase>,
    /// SendPrivateMessageUseCase（プライベートメッセージ送信のユースケース）
    pub send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    /// StartPrivateChatUseCase（プライベートチャット開始のユースケース）
    pub start_private_chat_usecase: Arc<StartPrivateChatUseCase>,
    /// TypingTracker（タイピング状態の追跡）
    pub typing_tracker: Arc<TypingTracker>,
    /// Repository（HTTP ハンドラからの読み取り用）
    pub repository: Arc<dyn RosterRepository>,
}
