//! UseCase: 退室処理
//!
//! 明示的な leave と、切断時の暗黙 leave の両方から呼ばれる。
//! 参加者エントリの削除は冪等で、ルームや参加者が存在しなくても失敗しない。

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomChannel, RoomId, RoomRepository, Timestamp, UserId};

use super::error::LeaveError;

/// 退室のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// RoomChannel（ルーム単位の配信の抽象化）
    channel: Arc<dyn RoomChannel>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, channel: Arc<dyn RoomChannel>) -> Self {
        Self {
            repository,
            channel,
        }
    }

    /// 退室を実行（冪等）
    pub async fn execute(&self, user_id: &UserId, room_id: &RoomId) -> Result<(), LeaveError> {
        use rondan_shared::time::get_jst_timestamp;

        let now = Timestamp::new(get_jst_timestamp());
        match self.repository.remove_participant(room_id, user_id, now).await {
            Ok(()) => Ok(()),
            // ルームが既に消えている場合も退室は成立したとみなす
            Err(RepositoryError::RoomNotFound) => Ok(()),
            Err(other) => Err(LeaveError::Repository(other)),
        }
    }

    /// 退室を残りの購読者にブロードキャストする
    pub async fn broadcast_user_left(
        &self,
        room_id: &RoomId,
        message: &str,
    ) -> Result<(), String> {
        self.channel
            .publish(room_id, message)
            .await
            .map_err(|e| e.to_string())
    }
}
