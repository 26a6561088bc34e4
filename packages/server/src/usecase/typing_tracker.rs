//! UseCase: タイピング状態の追跡
//!
//! セッションごとにタイピング状態と失効タイマーを管理します。
//! 明示的な停止通知が来ない場合でも、最後の開始通知から一定時間で
//! 自動的に失効します。開始通知が連続した場合はタイマーを張り直します。
//!
//! タイピング中一覧の変化は全セッションへブロードキャストされます。
//! 一覧のシリアライズはエンコーダの注入で行い、この層は DTO を知りません。

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::warn;

use crate::domain::{MessagePusher, RosterRepository, SessionId};

/// タイピング状態の自動失効までの時間
pub const TYPING_EXPIRY: Duration = Duration::from_millis(3000);

/// タイピング中一覧のシリアライズ関数
pub type TypingListEncoder = Arc<dyn Fn(Vec<String>) -> String + Send + Sync>;

/// タイピング状態のトラッカー
pub struct TypingTracker {
    /// Repository（表示名の解決に使用）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（一覧のブロードキャストに使用）
    message_pusher: Arc<dyn MessagePusher>,
    /// タイピング中一覧のエンコーダ
    encoder: TypingListEncoder,
    /// 自動失効までの時間
    expiry: Duration,
    /// タイピング中セッションと失効タイマー
    timers: Mutex<HashMap<SessionId, JoinHandle<()>>>,
}

impl TypingTracker {
    /// 新しい TypingTracker を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        encoder: TypingListEncoder,
    ) -> Self {
        Self::with_expiry(repository, message_pusher, encoder, TYPING_EXPIRY)
    }

    /// 失効時間を指定して作成
    pub fn with_expiry(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        encoder: TypingListEncoder,
        expiry: Duration,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            encoder,
            expiry,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// タイピング状態を更新し、一覧をブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `session_id` - 状態を更新するセッションの ID
    /// * `is_typing` - `true` で開始（タイマーを張り直す）、`false` で即時停止
    pub async fn set_typing(self: Arc<Self>, session_id: SessionId, is_typing: bool) {
        {
            let mut timers = self.timers.lock().await;

            // 既存タイマーは常に破棄（開始の連続はタイマーの張り直しになる）
            if let Some(handle) = timers.remove(&session_id) {
                handle.abort();
            }

            if is_typing {
                let tracker = Arc::clone(&self);
                let expired_id = session_id.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(tracker.expiry).await;
                    tracker.expire(&expired_id).await;
                });
                timers.insert(session_id, handle);
            }
        }

        self.broadcast_typing_users().await;
    }

    /// 切断時のタイピング状態の後始末
    ///
    /// タイピング中だった場合のみ一覧を再ブロードキャストします。
    pub async fn clear(&self, session_id: &SessionId) {
        let removed = {
            let mut timers = self.timers.lock().await;
            timers.remove(session_id)
        };

        if let Some(handle) = removed {
            handle.abort();
            self.broadcast_typing_users().await;
        }
    }

    /// 失効タイマー満了時の処理
    ///
    /// 自タスクの JoinHandle を abort せずにエントリだけ取り除きます。
    async fn expire(&self, session_id: &SessionId) {
        {
            let mut timers = self.timers.lock().await;
            timers.remove(session_id);
        }
        self.broadcast_typing_users().await;
    }

    /// タイピング中の表示名一覧を全セッションへブロードキャスト
    async fn broadcast_typing_users(&self) {
        let typing_ids: Vec<SessionId> = {
            let timers = self.timers.lock().await;
            timers.keys().cloned().collect()
        };

        // 表示名の解決（切断済みセッションは一覧から自然に消える）
        let mut names: Vec<String> = self
            .repository
            .get_members()
            .await
            .into_iter()
            .filter(|m| typing_ids.contains(&m.id))
            .map(|m| m.name.as_str().to_string())
            .collect();
        names.sort();

        let message = (self.encoder)(names);
        let targets = self.repository.get_all_session_ids().await;
        if let Err(e) = self.message_pusher.broadcast(targets, &message).await {
            warn!("Failed to broadcast typing users: {}", e);
        }
    }
}
