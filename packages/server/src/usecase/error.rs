//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::ConnectionId;

/// イベント処理・ブロードキャストのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// join 前の接続から message / typing を受け取った
    #[error("connection '{0}' has not joined yet")]
    NotJoined(ConnectionId),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),

    #[error("failed to broadcast event: {0}")]
    BroadcastFailed(String),
}
