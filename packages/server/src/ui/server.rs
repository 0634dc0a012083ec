//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinParticipantUseCase,
    NotifyTypingUseCase, ReportErrorUseCase, SendMessageUseCase,
};

use super::{
    handler::{handle_panic, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Wrap routes with the HTTP middleware stack
///
/// Outermost first: panic to `500 Something broke!`, CORS (any origin,
/// GET/POST/OPTIONS, `Content-Type`), request tracing.
pub fn with_http_layers<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    routes
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Chat relay server
///
/// This struct encapsulates the use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     join_participant_usecase,
///     send_message_usecase,
///     notify_typing_usecase,
///     disconnect_participant_usecase,
///     report_error_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 3002).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        join_participant_usecase: Arc<JoinParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        notify_typing_usecase: Arc<NotifyTypingUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        report_error_usecase: Arc<ReportErrorUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_participant_usecase,
                join_participant_usecase,
                send_message_usecase,
                notify_typing_usecase,
                disconnect_participant_usecase,
                report_error_usecase,
            }),
        }
    }

    /// Build the axum router
    ///
    /// - `GET /`: health check
    /// - `GET /ws`: WebSocket endpoint
    pub fn into_router(self) -> Router {
        let routes = Router::new()
            .route("/", get(health_check))
            .route("/ws", get(websocket_handler));

        with_http_layers(routes).with_state(self.state)
    }

    /// Run the chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 3002)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Chat server listening on http://{}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
