//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 更新の直列化
//!
//! すべての操作は roomId をキーとするマップ全体の Mutex で直列化される。
//! 各操作はフィールド単位の mutation（participants の remove / append、
//! messages の append、status の set）であり、ドキュメント全体の上書きは
//! 行わない。トランスクリプトの順序は append が完了した順になる。
//!
//! ## 技術的負債
//!
//! ドメインモデル（`Room`）を直接ストレージとして使用しています。
//! 将来 DBMS 実装を追加する際は DTO への変換層が必要になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, KickedUser, Participant, RepositoryError, Room, RoomId, RoomRepository,
    RoomStatus, Timestamp, UserId,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// roomId → Room ドメインモデル
    rooms: Mutex<HashMap<String, Room>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// 保持しているルーム数を取得（テスト用）
    pub async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let key = room.id.as_str().to_string();
        if rooms.contains_key(&key) {
            return Err(RepositoryError::DuplicateRoom(key));
        }
        rooms.insert(key, room);
        Ok(())
    }

    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id.as_str())
            .cloned()
            .ok_or(RepositoryError::RoomNotFound)
    }

    async fn list_rooms_by_creator(
        &self,
        creator: &UserId,
        status: Option<RoomStatus>,
    ) -> Result<Vec<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        let mut found: Vec<Room> = rooms
            .values()
            .filter(|r| &r.created_by == creator)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        // 新しい順に並べる
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .remove(room_id.as_str())
            .map(|_| ())
            .ok_or(RepositoryError::RoomNotFound)
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or(RepositoryError::RoomNotFound)?;
        room.remove_participant(user_id);
        room.touch(now);
        Ok(())
    }

    async fn append_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or(RepositoryError::RoomNotFound)?;
        room.add_participant(participant)?;
        room.touch(now);
        Ok(())
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or(RepositoryError::RoomNotFound)?;
        room.add_message(message)?;
        room.touch(now);
        Ok(())
    }

    async fn append_kicked_user(
        &self,
        room_id: &RoomId,
        kicked: KickedUser,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or(RepositoryError::RoomNotFound)?;
        room.add_kicked_user(kicked);
        room.touch(now);
        Ok(())
    }

    async fn set_status(
        &self,
        room_id: &RoomId,
        status: RoomStatus,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or(RepositoryError::RoomNotFound)?;
        room.transition_status(status)?;
        room.touch(now);
        Ok(())
    }
}
