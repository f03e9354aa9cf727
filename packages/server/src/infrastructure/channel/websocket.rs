//! WebSocket を使った Room Channel 実装
//!
//! ## 責務
//!
//! - ルーム単位の購読者マップ（connection_id → `UnboundedSender`）の管理
//! - ルームの全購読者への配信（publish）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は接続ごとに生成された `UnboundedSender` を受け取り、配信に使用します。
//!
//! publish は送信者を除外しない。送信者の画面も他の参加者と同じ
//! ブロードキャスト経路でメッセージを受け取る。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, PusherChannel, RoomChannel, RoomId};

/// WebSocket を使った Room Channel 実装
pub struct WebSocketRoomChannel {
    /// roomId → (connection_id → sender)
    subscribers: Mutex<HashMap<String, HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketRoomChannel {
    /// 空の WebSocketRoomChannel を作成
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// ルームの購読者数を取得（テスト用）
    pub async fn subscriber_count(&self, room_id: &RoomId) -> usize {
        let subscribers = self.subscribers.lock().await;
        subscribers
            .get(room_id.as_str())
            .map(|conns| conns.len())
            .unwrap_or(0)
    }
}

impl Default for WebSocketRoomChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomChannel for WebSocketRoomChannel {
    async fn subscribe(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers
            .entry(room_id.as_str().to_string())
            .or_default()
            .insert(connection_id.clone(), sender);
        tracing::debug!(
            "Connection '{}' subscribed to room '{}'",
            connection_id,
            room_id.as_str()
        );
    }

    async fn unsubscribe(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let mut subscribers = self.subscribers.lock().await;
        if let Some(conns) = subscribers.get_mut(room_id.as_str()) {
            conns.remove(connection_id);
            if conns.is_empty() {
                subscribers.remove(room_id.as_str());
            }
        }
        tracing::debug!(
            "Connection '{}' unsubscribed from room '{}'",
            connection_id,
            room_id.as_str()
        );
    }

    async fn unsubscribe_all(&self, connection_id: &ConnectionId) {
        let mut subscribers = self.subscribers.lock().await;
        for conns in subscribers.values_mut() {
            conns.remove(connection_id);
        }
        subscribers.retain(|_, conns| !conns.is_empty());
        tracing::debug!("Connection '{}' unsubscribed from all rooms", connection_id);
    }

    async fn publish(&self, room_id: &RoomId, payload: &str) -> Result<(), MessagePushError> {
        let subscribers = self.subscribers.lock().await;

        let Some(conns) = subscribers.get(room_id.as_str()) else {
            tracing::debug!("No subscribers in room '{}', skipping publish", room_id.as_str());
            return Ok(());
        };

        for (connection_id, sender) in conns.iter() {
            // 配信では一部の送信失敗を許容
            if let Err(e) = sender.send(payload.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                );
            }
        }

        Ok(())
    }
}
