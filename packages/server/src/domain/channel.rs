//! Room Channel trait 定義
//!
//! ルーム単位のマルチキャスト（pub/sub）のインターフェース。
//! publish は送信者を除外しない。送信者自身の UI も自分の送った
//! メッセージをブロードキャスト経由で受け取る（描画の情報源を一本化する）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::session::ConnectionId;
use super::value::RoomId;

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Room Channel trait
#[async_trait]
pub trait RoomChannel: Send + Sync {
    /// 接続をルームのチャンネルに登録する
    async fn subscribe(&self, room_id: &RoomId, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続をルームのチャンネルから解除する
    async fn unsubscribe(&self, room_id: &RoomId, connection_id: &ConnectionId);

    /// 接続を全てのチャンネルから解除する（切断時のクリーンアップ）
    ///
    /// 明示的な leave が発行されなかった場合でも、切断時には必ず呼ばれる。
    async fn unsubscribe_all(&self, connection_id: &ConnectionId);

    /// ルームの全ての購読者（送信者を含む）に payload を配信する
    async fn publish(&self, room_id: &RoomId, payload: &str) -> Result<(), MessagePushError>;
}
