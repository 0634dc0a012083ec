//! InMemory Participant Registry 実装
//!
//! ドメイン層が定義する ParticipantRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス終了とともに消えます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DisplayName, Participant, ParticipantRegistry};

/// インメモリ Participant Registry 実装
#[derive(Default)]
pub struct InMemoryParticipantRegistry {
    /// Key: 接続 ID, Value: 参加者
    participants: Mutex<HashMap<ConnectionId, Participant>>,
}

impl InMemoryParticipantRegistry {
    /// 空の InMemoryParticipantRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRegistry for InMemoryParticipantRegistry {
    async fn register(&self, connection_id: ConnectionId, display_name: DisplayName) {
        let mut participants = self.participants.lock().await;
        if let Some(previous) = participants.insert(
            connection_id,
            Participant::new(connection_id, display_name.clone()),
        ) {
            tracing::debug!(
                "Connection '{}' renamed from '{}' to '{}'",
                connection_id,
                previous.display_name,
                display_name
            );
        }
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut participants = self.participants.lock().await;
        participants.remove(connection_id).map(|p| p.display_name)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let participants = self.participants.lock().await;
        participants
            .get(connection_id)
            .map(|p| p.display_name.clone())
    }

    async fn list_all(&self) -> Vec<DisplayName> {
        let participants = self.participants.lock().await;
        participants
            .values()
            .map(|p| p.display_name.clone())
            .collect()
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }
}
