//! Test helpers: in-process server and WebSocket test clients.

#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use futures_util::{SinkExt, StreamExt};
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
use kaiwa_shared::{
    protocol::{ClientEvent, MessagePayload, ServerEvent},
    time::SystemClock,
};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::Mutex,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a server wired with in-memory implementations
pub fn build_server() -> Server {
    let registry = Arc::new(InMemoryParticipantRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));
    let presence_lock = Arc::new(PresenceLock::new());

    Server::new(
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone())),
        Arc::new(JoinParticipantUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            presence_lock.clone(),
        )),
        Arc::new(SendMessageUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            Arc::new(SystemClock),
            Arc::new(MessageIdFactory::new()),
        )),
        Arc::new(NotifyTypingUseCase::new(
            registry.clone(),
            message_pusher.clone(),
        )),
        Arc::new(DisconnectParticipantUseCase::new(
            registry,
            message_pusher.clone(),
            presence_lock,
        )),
        Arc::new(ReportErrorUseCase::new(message_pusher)),
    )
}

/// Start a server on an ephemeral port and return its address
pub async fn spawn_server() -> SocketAddr {
    spawn_router(build_server().into_router()).await
}

/// Serve an arbitrary router on an ephemeral port and return its address
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    addr
}

/// WebSocket client speaking the chat protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let (stream, _response) = connect_async(format!("ws://{}/ws", addr))
            .await
            .expect("Failed to connect to test server");
        Self { stream }
    }

    /// Connect and wait until the server is reading this connection's frames
    ///
    /// The connection is registered as a broadcast target before its first
    /// frame is read, so a reply to a throwaway invalid frame proves it is live.
    pub async fn connect_ready(addr: SocketAddr) -> Self {
        let mut client = Self::connect(addr).await;
        client.send_raw("{}").await;
        match client.recv().await {
            ServerEvent::Error(_) => client,
            other => panic!("expected error reply, got {:?}", other),
        }
    }

    /// Connect and join, consuming the own `userJoined` echo
    pub async fn join(addr: SocketAddr, name: &str) -> Self {
        let mut client = Self::connect(addr).await;
        client.send(ClientEvent::Join(name.to_string())).await;
        match client.recv().await {
            ServerEvent::UserJoined(payload) if payload.user == name => client,
            other => panic!("expected own userJoined for '{}', got {:?}", name, other),
        }
    }

    pub async fn send(&mut self, event: ClientEvent) {
        let frame = event.encode().expect("Failed to encode client event");
        self.send_raw(&frame).await;
    }

    pub async fn send_raw(&mut self, frame: &str) {
        self.stream
            .send(Message::Text(frame.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_text(&mut self, text: &str) {
        self.send(ClientEvent::Message(MessagePayload {
            text: text.to_string(),
        }))
        .await;
    }

    /// Receive the next server event, failing the test after a timeout
    pub async fn recv(&mut self) -> ServerEvent {
        let next = tokio::time::timeout(RECV_TIMEOUT, async {
            while let Some(message) = self.stream.next().await {
                match message.expect("WebSocket read error") {
                    Message::Text(text) => {
                        return ServerEvent::decode(text.as_str())
                            .expect("Server sent an undecodable frame");
                    }
                    Message::Close(_) => panic!("server closed the connection"),
                    _ => continue,
                }
            }
            panic!("stream ended")
        })
        .await;

        next.expect("Timed out waiting for a server event")
    }

    pub async fn close(mut self) {
        self.stream
            .close(None)
            .await
            .expect("Failed to close WebSocket");
    }
}

/// Sort a users list so assertions do not depend on registry order
pub fn sorted(mut users: Vec<String>) -> Vec<String> {
    users.sort();
    users
}
