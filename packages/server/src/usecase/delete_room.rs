//! UseCase: ルーム削除処理
//!
//! 作成者による明示的な削除のみがレコードを消す（終了は消さない）。

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomId, RoomRepository, UserId};

use super::error::DeleteRoomError;

/// ルーム削除のユースケース
pub struct DeleteRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DeleteRoomUseCase {
    /// 新しい DeleteRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム削除を実行
    pub async fn execute(&self, actor: &UserId, room_id: &RoomId) -> Result<(), DeleteRoomError> {
        let room = self.repository.find_room(room_id).await.map_err(|e| match e {
            RepositoryError::RoomNotFound => DeleteRoomError::RoomNotFound,
            other => DeleteRoomError::Repository(other),
        })?;
        if &room.created_by != actor {
            return Err(DeleteRoomError::Forbidden);
        }

        self.repository
            .delete_room(room_id)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound => DeleteRoomError::RoomNotFound,
                other => DeleteRoomError::Repository(other),
            })
    }
}
