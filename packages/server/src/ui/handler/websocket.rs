//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, DisplayName, MessageText},
    infrastructure::dto::websocket::{ClientEvent, ErrorCode},
    ui::state::AppState,
    usecase::BroadcastError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: every broadcast or reply
/// addressed to this connection goes through its channel.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the handle before reading any frame, so the first `join`
    // already sees this connection as a broadcast target
    state
        .connect_participant_usecase
        .execute(connection_id, tx)
        .await;

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Inbound events of this connection are handled one at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text);
                    handle_frame(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring binary frame ({} bytes) from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await
    {
        Ok(Some(display_name)) => {
            tracing::info!("Broadcasted userLeft for '{}'", display_name);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Failed to broadcast userLeft for '{}': {}", connection_id, e);
        }
    }
}

/// Decode, validate and dispatch one inbound frame.
///
/// Rejected events are answered with an `error` event to this connection only
/// and leave the registry untouched.
async fn handle_frame(state: &AppState, connection_id: ConnectionId, frame: &str) {
    let event = match ClientEvent::decode(frame) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Invalid frame from '{}': {}", connection_id, e);
            report_error(
                state,
                connection_id,
                ErrorCode::InvalidPayload,
                e.to_string(),
            )
            .await;
            return;
        }
    };

    let result = match event {
        ClientEvent::Join(raw_name) => match DisplayName::try_from(raw_name) {
            Ok(display_name) => state
                .join_participant_usecase
                .execute(connection_id, display_name)
                .await
                .map(|_| ()),
            Err(e) => {
                tracing::warn!("Rejected join from '{}': {}", connection_id, e);
                report_error(
                    state,
                    connection_id,
                    ErrorCode::InvalidPayload,
                    e.to_string(),
                )
                .await;
                return;
            }
        },
        ClientEvent::Message(payload) => match MessageText::try_from(payload.text) {
            Ok(text) => state
                .send_message_usecase
                .execute(connection_id, text)
                .await
                .map(|_| ()),
            Err(e) => {
                tracing::warn!("Rejected message from '{}': {}", connection_id, e);
                report_error(
                    state,
                    connection_id,
                    ErrorCode::InvalidPayload,
                    e.to_string(),
                )
                .await;
                return;
            }
        },
        ClientEvent::Typing(is_typing) => state
            .notify_typing_usecase
            .execute(connection_id, is_typing)
            .await
            .map(|_| ()),
    };

    match result {
        Ok(()) => {}
        Err(e @ BroadcastError::NotJoined(_)) => {
            tracing::warn!("{}", e);
            report_error(
                state,
                connection_id,
                ErrorCode::NotJoined,
                "join the chat first".to_string(),
            )
            .await;
        }
        Err(e) => {
            tracing::warn!("Failed to handle event from '{}': {}", connection_id, e);
        }
    }
}

/// Send an `error` event to a single connection.
async fn report_error(
    state: &AppState,
    connection_id: ConnectionId,
    code: ErrorCode,
    message: String,
) {
    if let Err(e) = state
        .report_error_usecase
        .execute(connection_id, code, message)
        .await
    {
        tracing::debug!("Error reply to '{}' not delivered: {}", connection_id, e);
    }
}
