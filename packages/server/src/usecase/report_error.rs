//! UseCase: 拒否したイベントのエラー通知
//!
//! 検証に失敗したフレームや join 前の message / typing に対して、
//! 送信元の接続にだけ `error` イベントを返します。Registry は変更しません。

use std::sync::Arc;

use kaiwa_shared::protocol::{ErrorCode, ErrorPayload, ServerEvent};

use crate::domain::{ConnectionId, MessagePusher};

use super::{encode_event, error::BroadcastError};

/// エラー通知のユースケース
pub struct ReportErrorUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReportErrorUseCase {
    /// 新しい ReportErrorUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// エラー通知を実行
    ///
    /// # Arguments
    ///
    /// * `to` - 拒否したイベントの送信元
    /// * `code` - 拒否の理由
    /// * `message` - 人が読むための説明
    pub async fn execute(
        &self,
        to: ConnectionId,
        code: ErrorCode,
        message: String,
    ) -> Result<(), BroadcastError> {
        let event = ServerEvent::Error(ErrorPayload { code, message });
        let json = encode_event(&event)?;
        self.message_pusher
            .push_to(&to, &json)
            .await
            .map_err(|e| BroadcastError::BroadcastFailed(e.to_string()))
    }
}
