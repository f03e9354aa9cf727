//! UseCase: ルーム取得処理

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomId, RoomRepository, RoomStatus, UserId};

use super::error::GetRoomError;

/// ルーム取得のユースケース
pub struct GetRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomUseCase {
    /// 新しい GetRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームのスナップショット（参加者 + トランスクリプト）を取得
    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomError> {
        self.repository.find_room(room_id).await.map_err(|e| match e {
            RepositoryError::RoomNotFound => GetRoomError::RoomNotFound,
            other => GetRoomError::Repository(other),
        })
    }

    /// 作成者のルーム一覧を取得（ステータスで絞り込み可能）
    pub async fn list_by_creator(
        &self,
        creator: &UserId,
        status: Option<RoomStatus>,
    ) -> Result<Vec<Room>, GetRoomError> {
        self.repository
            .list_rooms_by_creator(creator, status)
            .await
            .map_err(GetRoomError::Repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DebateType, RoomFormat, Timestamp};
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use rondan_shared::time::get_jst_timestamp;

    fn test_room(room_id: &str) -> Room {
        Room::new(
            RoomId::new(room_id.to_string()).unwrap(),
            "topic".to_string(),
            "description".to_string(),
            "General".to_string(),
            RoomFormat::Debate,
            Some(DebateType::FreeForAll),
            UserId::new("creator".to_string()).unwrap(),
            2,
            Timestamp::new(get_jst_timestamp()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_room_success() {
        // テスト項目: 存在するルームのスナップショットを取得できる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.insert_room(test_room("room-1")).await.unwrap();
        let usecase = GetRoomUseCase::new(repository);

        // when (操作):
        let room_id = RoomId::new("room-1".to_string()).unwrap();
        let result = usecase.execute(&room_id).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, room_id);
    }

    #[tokio::test]
    async fn test_get_room_not_found() {
        // テスト項目: 存在しないルームは RoomNotFound になる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = GetRoomUseCase::new(repository);

        // when (操作):
        let missing = RoomId::new("missing".to_string()).unwrap();
        let result = usecase.execute(&missing).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), GetRoomError::RoomNotFound);
    }

    #[tokio::test]
    async fn test_list_by_creator() {
        // テスト項目: 作成者のルームだけが一覧に含まれる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.insert_room(test_room("room-1")).await.unwrap();
        repository.insert_room(test_room("room-2")).await.unwrap();
        let usecase = GetRoomUseCase::new(repository);

        // when (操作):
        let creator = UserId::new("creator".to_string()).unwrap();
        let someone_else = UserId::new("other".to_string()).unwrap();
        let mine = usecase.list_by_creator(&creator, None).await.unwrap();
        let theirs = usecase.list_by_creator(&someone_else, None).await.unwrap();

        // then (期待する結果):
        assert_eq!(mine.len(), 2);
        assert_eq!(theirs.len(), 0);
    }
}
