//! WebSocket client session management.

use std::{fmt::Display, time::Duration};

use futures_util::{Sink, SinkExt, StreamExt};
use kaiwa_shared::protocol::{ClientEvent, MessagePayload, ServerEvent};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::{sync::mpsc, time::Instant};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    config::Endpoints,
    domain::{
        ChatView, InputCommand, TYPING_COMMAND, TYPING_IDLE_TIMEOUT_SECS, TypingIndicator,
        parse_input,
    },
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Ask the HTTP health check endpoint whether the server is up
pub async fn check_health(endpoints: &Endpoints) -> Result<(), ClientError> {
    let response = reqwest::get(&endpoints.health_url)
        .await
        .map_err(|e| ClientError::ServerUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ClientError::ServerUnavailable(format!(
            "health check returned {}",
            response.status()
        )));
    }

    Ok(())
}

/// Encode and send one client event
async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let json = event
        .encode()
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Run one WebSocket client session until the user exits or the connection drops
pub async fn run_client_session(endpoints: &Endpoints, name: &str) -> Result<(), ClientError> {
    check_health(endpoints).await?;

    let (ws_stream, _response) = connect_async(endpoints.websocket_url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    print!("{}", MessageFormatter::format_connected(chrono::Utc::now()));
    println!(
        "You are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.",
        name
    );
    println!("Enter {} to show the others that you are typing.\n", TYPING_COMMAND);

    let (mut write, mut read) = ws_stream.split();

    send_event(&mut write, &ClientEvent::Join(name.to_string())).await?;

    // Spawn a task to handle incoming events
    let name_for_read = name.to_string();
    let mut read_task = tokio::spawn(async move {
        let mut view = ChatView::new(name_for_read.clone());
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match ServerEvent::decode(text.as_str()) {
                        Ok(event) => {
                            view.apply(&event);
                            MessageFormatter::format_event(&event, &view)
                        }
                        Err(e) => {
                            tracing::debug!("Unrecognized frame: {}", e);
                            Some(MessageFormatter::format_raw_message(text.as_str()))
                        }
                    };
                    if let Some(formatted) = formatted {
                        print!("{}", formatted);
                        redisplay_prompt(&name_for_read);
                    }
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline is synchronous, so it gets its own thread
    let prompt = format!("{}> ", name);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Forward typed lines to the server, and clear the typing indicator
    // once it has been idle for a while or a message goes out
    let mut write_task = tokio::spawn(async move {
        let idle_timeout = Duration::from_secs(TYPING_IDLE_TIMEOUT_SECS);
        let mut typing = TypingIndicator::new();

        loop {
            let deadline = typing.deadline();
            let events: Vec<ClientEvent> = tokio::select! {
                line = input_rx.recv() => {
                    let Some(line) = line else { break };
                    match parse_input(&line) {
                        Some(InputCommand::StartTyping) => {
                            vec![typing.start(Instant::now(), idle_timeout)]
                        }
                        Some(InputCommand::Message(text)) => typing
                            .before_message()
                            .into_iter()
                            .chain([ClientEvent::Message(MessagePayload { text })])
                            .collect(),
                        None => continue,
                    }
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                    if deadline.is_some() =>
                {
                    typing.expire(Instant::now()).into_iter().collect()
                }
            };

            for event in &events {
                if let Err(e) = send_event(&mut write, event).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return true;
                }
            }
        }

        write.send(Message::Close(None)).await.ok();
        false
    });

    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
