//! UseCase: 入力中（typing）通知
//!
//! サーバーは typing の状態を保持せず、受け取った真偽値を送信者以外に中継するだけです。
//! typing(false) の送信（タイムアウトによる解除）はクライアントの責務です。

use std::sync::Arc;

use kaiwa_shared::protocol::{ServerEvent, TypingPayload};

use crate::domain::{ConnectionId, MessagePusher, ParticipantRegistry};

use super::{encode_event, error::BroadcastError};

/// typing 通知のユースケース
pub struct NotifyTypingUseCase {
    /// Registry（参加者レジストリの抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    /// 新しい NotifyTypingUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// typing 通知を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 通知した接続（送信者を除く）
    /// * `Err(BroadcastError::NotJoined)` - 送信元がまだ join していない
    pub async fn execute(
        &self,
        from: ConnectionId,
        is_typing: bool,
    ) -> Result<Vec<ConnectionId>, BroadcastError> {
        let user = self
            .registry
            .lookup(&from)
            .await
            .ok_or(BroadcastError::NotJoined(from))?;

        let event = ServerEvent::UserTyping(TypingPayload {
            user: user.into_string(),
            is_typing,
        });
        let json = encode_event(&event)?;

        let targets = self.get_broadcast_targets(&from).await;
        self.message_pusher
            .broadcast(targets.clone(), &json)
            .await
            .map_err(|e| BroadcastError::BroadcastFailed(e.to_string()))?;

        Ok(targets)
    }

    /// 送信者以外の全ての接続 ID を返す
    async fn get_broadcast_targets(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.message_pusher
            .connected_client_ids()
            .await
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }
}
