//! UseCase 層: Event Broadcaster
//!
//! 接続ライフサイクルの各イベント（connect / join / message / typing /
//! disconnect）を 1 ユースケースずつ実装します。各ユースケースは
//! Registry を更新し（必要な場合）、適切な宛先にイベントをブロードキャストします。
//!
//! | イベント | Registry | ブロードキャスト | 宛先 |
//! |---|---|---|---|
//! | connect | - | - | - |
//! | join | register | userJoined | 全接続（送信者を含む） |
//! | message | - | message | 全接続（送信者を含む） |
//! | typing | - | userTyping | 送信者以外の全接続 |
//! | disconnect | unregister | userLeft | 残りの全接続 |
//!
//! join / disconnect は PresenceLock を共有し、Registry 更新からブロードキャストまでを
//! 直列に実行する。拒否したイベントへの error は ReportErrorUseCase が送信者にだけ返す。

mod connect_participant;
mod disconnect_participant;
mod error;
mod join_participant;
mod notify_typing;
mod presence_lock;
mod report_error;
mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::BroadcastError;
pub use join_participant::JoinParticipantUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use presence_lock::PresenceLock;
pub use report_error::ReportErrorUseCase;
pub use send_message::SendMessageUseCase;

use kaiwa_shared::protocol::ServerEvent;

/// ServerEvent を JSON 文字列にエンコード
fn encode_event(event: &ServerEvent) -> Result<String, BroadcastError> {
    event
        .encode()
        .map_err(|e| BroadcastError::EncodeFailed(e.to_string()))
}

#[cfg(test)]
mod test_helper {
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use kaiwa_shared::protocol::ServerEvent;
    use tokio::sync::{Mutex, mpsc};

    use crate::{
        domain::{
            ConnectionId, ConnectionIdFactory, DisplayName, MessagePusher, ParticipantRegistry,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryParticipantRegistry,
        },
    };

    use super::PresenceLock;

    pub fn create_test_registry() -> Arc<InMemoryParticipantRegistry> {
        Arc::new(InMemoryParticipantRegistry::new())
    }

    pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        Arc::new(WebSocketMessagePusher::new(clients))
    }

    pub fn create_test_presence_lock() -> Arc<PresenceLock> {
        Arc::new(PresenceLock::new())
    }

    /// 新しい接続を MessagePusher に登録し、その受信側を返す
    pub async fn connect(
        pusher: &WebSocketMessagePusher,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionIdFactory::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_client(connection_id, tx).await;
        (connection_id, rx)
    }

    pub fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    /// 受信済みのイベントを 1 件取り出す（無ければ None）
    pub fn try_recv_event(rx: &mut mpsc::UnboundedReceiver<String>) -> Option<ServerEvent> {
        rx.try_recv()
            .ok()
            .map(|frame| ServerEvent::decode(&frame).unwrap())
    }

    /// 受信済みのイベントを全て取り出す
    pub fn drain_events(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
        std::iter::from_fn(|| try_recv_event(rx)).collect()
    }

    /// 次の list_all だけ、スナップショット取得後に遅延して返す Registry
    ///
    /// スナップショットからブロードキャストまでの間に別の presence 変更が
    /// 割り込む状況を再現する。
    pub struct DelayedSnapshotRegistry {
        inner: InMemoryParticipantRegistry,
        delay_next: AtomicBool,
    }

    impl DelayedSnapshotRegistry {
        pub fn new() -> Self {
            Self {
                inner: InMemoryParticipantRegistry::new(),
                delay_next: AtomicBool::new(false),
            }
        }

        pub fn delay_next_snapshot(&self) {
            self.delay_next.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ParticipantRegistry for DelayedSnapshotRegistry {
        async fn register(&self, connection_id: ConnectionId, display_name: DisplayName) {
            self.inner.register(connection_id, display_name).await;
        }

        async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
            self.inner.unregister(connection_id).await
        }

        async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
            self.inner.lookup(connection_id).await
        }

        async fn list_all(&self) -> Vec<DisplayName> {
            let snapshot = self.inner.list_all().await;
            if self.delay_next.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            snapshot
        }

        async fn count(&self) -> usize {
            self.inner.count().await
        }
    }
}
