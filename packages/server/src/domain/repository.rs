//! Repository trait 定義
//!
//! ドメイン層が必要とする参加者レジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName};

/// Participant Registry trait
///
/// 接続 ID から表示名へのマッピングを管理する。
/// 永続化は行わず、プロセスの生存期間中のみ保持される。
///
/// ## 不変条件
///
/// - 登録中の参加者の間で接続 ID は一意
/// - 表示名の一意性は保証しない
#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    /// 参加者を登録（既存の接続 ID の場合は上書き）
    async fn register(&self, connection_id: ConnectionId, display_name: DisplayName);

    /// 参加者を削除し、削除した表示名を返す
    ///
    /// 未登録の接続 ID に対しては何もせず `None` を返す（冪等）。
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 接続 ID に対応する表示名を取得
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 登録中の全ての表示名のスナップショットを取得
    ///
    /// 順序は保証しない。
    async fn list_all(&self) -> Vec<DisplayName>;

    /// 登録中の参加者数を取得
    async fn count(&self) -> usize;
}
