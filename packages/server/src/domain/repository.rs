//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 更新操作の粒度
//!
//! Room ドキュメント全体の上書きではなく、フィールド単位の操作
//! （参加者の remove / append、メッセージの append、ステータスの set）
//! のみを公開する。Membership 管理とメッセージ中継が同じルームへ並行に
//! 書き込んでも、操作単位で直列化されるため取りこぼしが起きない。

use async_trait::async_trait;

use super::error::RepositoryError;
use super::room::{ChatMessage, KickedUser, Participant, Room, RoomStatus};
use super::value::{RoomId, Timestamp, UserId};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を新規作成する
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// Room を ID で取得する
    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 作成者でルームを検索する（ステータスで絞り込み可能）
    async fn list_rooms_by_creator(
        &self,
        creator: &UserId,
        status: Option<RoomStatus>,
    ) -> Result<Vec<Room>, RepositoryError>;

    /// Room を削除する
    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError>;

    /// userId に一致する参加者エントリを削除する（存在しなければ no-op）
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// 参加者エントリを追加する
    async fn append_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
        now: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// メッセージ履歴に追記する
    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
        now: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// キック履歴に追記する
    async fn append_kicked_user(
        &self,
        room_id: &RoomId,
        kicked: KickedUser,
        now: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// ステータスを遷移させる
    async fn set_status(
        &self,
        room_id: &RoomId,
        status: RoomStatus,
        now: Timestamp,
    ) -> Result<(), RepositoryError>;
}
