//! UseCase: 接続処理
//!
//! WebSocket の接続確立時に、その接続の送信チャンネルを MessagePusher に登録します。
//! Registry には何も登録しません（join するまでは匿名の接続）。
//! 登録後は join 前でもブロードキャストを受信します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        tracing::info!("Connection '{}' established", connection_id);
    }
}
