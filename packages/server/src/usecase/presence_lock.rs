//! presence 変更（join / disconnect）の直列化
//!
//! Registry と MessagePusher はそれぞれ独立したロックを持つため、
//! 「Registry 更新 → スナップショット → ブロードキャスト」を続けて実行しても
//! 他の presence 変更が割り込みうる。割り込まれると古い users を持つ
//! userJoined / userLeft が後から配信され、クライアントの一覧が古いまま残る。
//!
//! 同じ PresenceLock を共有するユースケースは、この 3 手順を 1 区間として実行する。
//! 各接続の送信チャンネルは FIFO なので、presence イベントは Registry の
//! 更新順に届き、最後に届いた users が常に最新のスナップショットになる。

use tokio::sync::{Mutex, MutexGuard};

/// presence 変更を直列化するロック
#[derive(Debug, Default)]
pub struct PresenceLock {
    inner: Mutex<()>,
}

impl PresenceLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// presence 変更の区間を開始（ガードの drop で終了）
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
