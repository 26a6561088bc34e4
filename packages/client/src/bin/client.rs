//! WebSocket chat client with presence, typing indicators, and private messages.
//!
//! Connects to a WebSocket chat server and sends messages from stdin.
//! Slash commands drive the presence features:
//! `/users`, `/pm <name> <message>`, `/chat <name>`, `/typing [on|off]`.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-client -- --name Alice
//! cargo run --bin idobata-client -- -n Bob
//! ```

use clap::Parser;

use idobata_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "WebSocket chat client with presence and private messages", long_about = None)]
struct Args {
    /// Display name shown to other users (need not be unique)
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = idobata_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
