//! MessagePusher trait 定義
//!
//! セッションへのメッセージ送信を抽象化します。WebSocket の生成は UI 層、
//! チャンネルの管理と送信は Infrastructure 層の実装が担当します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, SessionId};

/// セッションへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// - `push_to`: 単一セッションへの送信（宛先不明はエラー）
/// - `broadcast`: 複数セッションへの送信（一部失敗を許容するベストエフォート）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションのチャンネルを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションのチャンネルを登録解除
    async fn unregister_client(&self, session_id: &SessionId);

    /// 特定のセッションへ送信
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数のセッションへ送信（ベストエフォート）
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
