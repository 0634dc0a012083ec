//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのイベント送信（通知）のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::ConnectionId;

/// 1 接続分の送信チャンネル
///
/// 受信側は UI 層の writer タスクが保持し、WebSocket に書き出す。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
///
/// 接続ハンドルを管理し、個別送信・ブロードキャストを行う。
/// 送信はベストエフォート（再送・バッファリングなし）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続ハンドルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続ハンドルを登録解除（未登録の場合は何もしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 登録中の全ての接続 ID のスナップショットを取得
    async fn connected_client_ids(&self) -> Vec<ConnectionId>;

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にメッセージを送信
    ///
    /// 一部の送信失敗（切断済みの接続など）は許容し、スキップする。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
