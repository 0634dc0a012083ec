//! Kaiwa chat relay server.
//!
//! Broadcasts join/leave events, chat messages and typing indicators to every
//! connected client. State lives in memory only.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-server
//! PORT=4000 cargo run --bin kaiwa-server
//! cargo run --bin kaiwa-server -- --host 127.0.0.1 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use kaiwa_server::{
    domain::MessageIdFactory,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryParticipantRegistry,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinParticipantUseCase,
        NotifyTypingUseCase, PresenceLock, ReportErrorUseCase, SendMessageUseCase,
    },
};
use kaiwa_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "kaiwa-server")]
#[command(about = "Real-time chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3002")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (in-memory)
    let registry = Arc::new(InMemoryParticipantRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases (join and disconnect share one presence lock)
    let presence_lock = Arc::new(PresenceLock::new());
    let connect_participant_usecase =
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
    let join_participant_usecase = Arc::new(JoinParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        presence_lock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
        Arc::new(MessageIdFactory::new()),
    ));
    let notify_typing_usecase = Arc::new(NotifyTypingUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        presence_lock,
    ));
    let report_error_usecase = Arc::new(ReportErrorUseCase::new(message_pusher.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        join_participant_usecase,
        send_message_usecase,
        notify_typing_usecase,
        disconnect_participant_usecase,
        report_error_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
