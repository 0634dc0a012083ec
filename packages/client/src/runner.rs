//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    config::Endpoints,
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
};

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client, reconnecting after connection loss.
///
/// Returns `Ok(())` when the user ends the session, or the last error once
/// the reconnect attempts are exhausted.
pub async fn run_client(base_url: &str, name: &str) -> Result<(), ClientError> {
    let endpoints = Endpoints::from_base_url(base_url)?;
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            endpoints.websocket_url,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&endpoints, name).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
