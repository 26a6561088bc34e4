//! WebSocket chat server with presence, typing indicators, and private messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-server
//! cargo run --bin idobata-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use idobata_server::{
    domain::{Roster, Timestamp},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository},
    ui::{Server, typing_list_encoder},
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, SendPrivateMessageUseCase,
        SendPublicMessageUseCase, StartPrivateChatUseCase, TypingTracker,
    },
};
use idobata_shared::{
    logger::setup_logger,
    time::{SystemClock, get_jst_timestamp},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebSocket chat server with presence and private messages", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory database)
    let roster = Arc::new(Mutex::new(Roster::new(Timestamp::new(get_jst_timestamp()))));
    let repository = Arc::new(InMemoryRosterRepository::new(roster));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let connect_user_usecase = Arc::new(ConnectUserUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_user_usecase = Arc::new(DisconnectUserUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let send_public_message_usecase = Arc::new(SendPublicMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_private_message_usecase = Arc::new(SendPrivateMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let start_private_chat_usecase = Arc::new(StartPrivateChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let typing_tracker = Arc::new(TypingTracker::new(
        repository.clone(),
        message_pusher.clone(),
        typing_list_encoder(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_user_usecase,
        disconnect_user_usecase,
        send_public_message_usecase,
        send_private_message_usecase,
        start_private_chat_usecase,
        typing_tracker,
        repository,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
