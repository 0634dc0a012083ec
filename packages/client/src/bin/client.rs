//! Terminal chat client.
//!
//! Joins the chat under a display name, sends every non-blank line as a chat
//! message and prints presence, typing and message events as they arrive.
//! Reconnects on connection loss (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-client -- --name Alice
//! CHAT_SERVER_URL=http://chat.local:3002 cargo run --bin kaiwa-client -- -n Bob
//! ```

use clap::Parser;

use kaiwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kaiwa-client")]
#[command(about = "Terminal client for the kaiwa chat server", long_about = None)]
struct Args {
    /// Display name shown to other participants
    #[arg(short = 'n', long)]
    name: String,

    /// Chat server base URL
    #[arg(
        short = 'u',
        long,
        env = "CHAT_SERVER_URL",
        default_value = "http://127.0.0.1:3002"
    )]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = kaiwa_client::run_client(&args.url, &args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
