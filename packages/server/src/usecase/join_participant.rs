//! UseCase: 参加（join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinParticipantUseCase::execute() メソッド
//! - Registry への登録と userJoined のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - userJoined の users は常に Registry の完全なスナップショットでなければならない
//! - 送信者自身も userJoined を受け取る（join の確認はこれしかない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者 / 2 人目の参加者
//! - エッジケース：join 前の接続も userJoined を受け取る、再 join（上書き）
//! - 並行性：同時 join でも最後に届く userJoined が最新の users を持つ

use std::sync::Arc;

use kaiwa_shared::protocol::ServerEvent;

use crate::{
    domain::{ConnectionId, DisplayName, MessagePusher, ParticipantRegistry},
    infrastructure::dto::conversion::presence_payload,
};

use super::{encode_event, error::BroadcastError, presence_lock::PresenceLock};

/// 参加のユースケース
pub struct JoinParticipantUseCase {
    /// Registry（参加者レジストリの抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// presence 変更の直列化（DisconnectParticipantUseCase と共有）
    presence_lock: Arc<PresenceLock>,
}

impl JoinParticipantUseCase {
    /// 新しい JoinParticipantUseCase を作成
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

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<DisplayName>)` - 参加後の全参加者の表示名
    /// * `Err(BroadcastError)` - ブロードキャスト失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
    ) -> Result<Vec<DisplayName>, BroadcastError> {
        // 登録からブロードキャストまで他の presence 変更を割り込ませない
        let _presence = self.presence_lock.acquire().await;

        // 1. Registry に登録（既に join 済みなら上書き）
        self.registry
            .register(connection_id, display_name.clone())
            .await;
        tracing::info!(
            "Connection '{}' joined as '{}'",
            connection_id,
            display_name
        );

        // 2. 参加後のスナップショットを取得
        let users = self.registry.list_all().await;

        // 3. 全接続（送信者を含む）にブロードキャスト
        let event = ServerEvent::UserJoined(presence_payload(&display_name, users.clone()));
        let json = encode_event(&event)?;
        let targets = self.message_pusher.connected_client_ids().await;
        self.message_pusher
            .broadcast(targets, &json)
            .await
            .map_err(|e| BroadcastError::BroadcastFailed(e.to_string()))?;

        Ok(users)
    }
}
