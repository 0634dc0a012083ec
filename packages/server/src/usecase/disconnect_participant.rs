//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続ハンドルの登録解除、Registry からの削除、userLeft のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - userLeft の users は削除後のスナップショットでなければならない
//! - 切断した接続自身には何も送らない
//! - 二重に切断処理が走っても安全でなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：join 前の切断（通知なし）、二重切断
//! - 並行性：切断と join が重なっても最後に届く presence イベントが最新の users を持つ

use std::sync::Arc;

use kaiwa_shared::protocol::ServerEvent;

use crate::{
    domain::{ConnectionId, DisplayName, MessagePusher, ParticipantRegistry},
    infrastructure::dto::conversion::presence_payload,
};

use super::{encode_event, error::BroadcastError, presence_lock::PresenceLock};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Registry（参加者レジストリの抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// presence 変更の直列化（JoinParticipantUseCase と共有）
    presence_lock: Arc<PresenceLock>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        presence_lock: Arc<PresenceLock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            presence_lock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(DisplayName))` - 切断した参加者の表示名（userLeft を通知済み）
    /// * `Ok(None)` - join していない接続だった（通知なし）
    /// * `Err(BroadcastError)` - ブロードキャスト失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Option<DisplayName>, BroadcastError> {
        let _presence = self.presence_lock.acquire().await;

        // 1. 接続ハンドルを登録解除（切断した接続自身には送らない）
        self.message_pusher.unregister_client(&connection_id).await;

        // 2. Registry から削除
        let Some(display_name) = self.registry.unregister(&connection_id).await else {
            tracing::info!("Connection '{}' closed before joining", connection_id);
            return Ok(None);
        };
        tracing::info!(
            "Connection '{}' ('{}') disconnected",
            connection_id,
            display_name
        );

        // 3. 削除後のスナップショットを残りの全接続にブロードキャスト
        let users = self.registry.list_all().await;
        let event = ServerEvent::UserLeft(presence_payload(&display_name, users));
        let json = encode_event(&event)?;
        let targets = self.message_pusher.connected_client_ids().await;
        self.message_pusher
            .broadcast(targets, &json)
            .await
            .map_err(|e| BroadcastError::BroadcastFailed(e.to_string()))?;

        Ok(Some(display_name))
    }
}
