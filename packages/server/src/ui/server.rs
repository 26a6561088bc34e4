//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::RosterRepository,
    infrastructure::dto::websocket::ServerEvent,
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, SendPrivateMessageUseCase,
        SendPublicMessageUseCase, StartPrivateChatUseCase, TypingListEncoder, TypingTracker,
    },
};

use super::{
    handler::{debug_roster, get_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// タイピング中一覧をワイヤフォーマットへ変換するエンコーダを作成
///
/// TypingTracker は DTO を知らないため、シリアライズはここで注入します。
pub fn typing_list_encoder() -> TypingListEncoder {
    Arc::new(|names| serde_json::to_string(&ServerEvent::update_typing_users(names)).unwrap())
}

/// WebSocket chat server
///
/// Encapsulates the wired usecases and provides a method to run the server.
pub struct Server {
    /// ConnectUserUseCase（ユーザー接続のユースケース）
    connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（ユーザー切断のユースケース）
    disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// SendPublicMessageUseCase（公開メッセージ送信のユースケース）
    send_public_message_usecase: Arc<SendPublicMessageUseCase>,
    /// SendPrivateMessageUseCase（プライベートメッセージ送信のユースケース）
    send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    /// StartPrivateChatUseCase（プライベートチャット開始のユースケース）
    start_private_chat_usecase: Arc<StartPrivateChatUseCase>,
    /// TypingTracker（タイピング状態の追跡）
    typing_tracker: Arc<TypingTracker>,
    /// Repository（HTTP ハンドラからの読み取り用）
    repository: Arc<dyn RosterRepository>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_user_usecase: Arc<ConnectUserUseCase>,
        disconnect_user_usecase: Arc<DisconnectUserUseCase>,
        send_public_message_usecase: Arc<SendPublicMessageUseCase>,
        send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
        start_private_chat_usecase: Arc<StartPrivateChatUseCase>,
        typing_tracker: Arc<TypingTracker>,
        repository: Arc<dyn RosterRepository>,
    ) -> Self {
        Self {
            connect_user_usecase,
            disconnect_user_usecase,
            send_public_message_usecase,
            send_private_message_usecase,
            start_private_chat_usecase,
            typing_tracker,
            repository,
        }
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app_state = Arc::new(AppState {
            connect_user_usecase: self.connect_user_usecase,
            disconnect_user_usecase: self.disconnect_user_usecase,
            send_public_message_usecase: self.send_public_message_usecase,
            send_private_message_usecase: self.send_private_message_usecase,
            start_private_chat_usecase: self.start_private_chat_usecase,
            typing_tracker: self.typing_tracker,
            repository: self.repository,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence))
            .route("/debug/roster", get(debug_roster))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws?name=<display name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
