//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - author の解決、MessageId の採番、全接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - message は送信者を含む全接続に届かなければならない
//! - join 前の接続からのメッセージは author が無いため拒否する
//! - MessageId は並行送信でも重複してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の参加者がいる状態での送信
//! - 異常系：join 前の送信
//! - エッジケース：連続送信時の MessageId

use std::sync::Arc;

use kaiwa_shared::{protocol::ServerEvent, time::Clock};

use crate::domain::{
    ChatMessage, ConnectionId, MessageIdFactory, MessagePusher, MessageText, ParticipantRegistry,
    Timestamp,
};

use super::{encode_event, error::BroadcastError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（参加者レジストリの抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 送信時刻の取得元
    clock: Arc<dyn Clock>,
    /// MessageId の採番
    message_id_factory: Arc<MessageIdFactory>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        message_id_factory: Arc<MessageIdFactory>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
            message_id_factory,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続 ID
    /// * `text` - メッセージ本文（検証済み）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ブロードキャストしたメッセージ
    /// * `Err(BroadcastError::NotJoined)` - 送信元がまだ join していない
    pub async fn execute(
        &self,
        from: ConnectionId,
        text: MessageText,
    ) -> Result<ChatMessage, BroadcastError> {
        // 1. author を解決（join 前なら拒否）
        let author = self
            .registry
            .lookup(&from)
            .await
            .ok_or(BroadcastError::NotJoined(from))?;

        // 2. メッセージを生成（保存はしない）
        let message = ChatMessage::new(
            self.message_id_factory.generate(),
            author,
            text,
            Timestamp::new(self.clock.now_millis()),
        );

        // 3. 全接続（送信者を含む）にブロードキャスト
        let event = ServerEvent::Message(message.clone().into());
        let json = encode_event(&event)?;
        let targets = self.message_pusher.connected_client_ids().await;
        tracing::debug!(
            "Broadcasting message {} from '{}' to {} connection(s)",
            message.id.value(),
            message.author,
            targets.len()
        );
        self.message_pusher
            .broadcast(targets, &json)
            .await
            .map_err(|e| BroadcastError::BroadcastFailed(e.to_string()))?;

        Ok(message)
    }
}
