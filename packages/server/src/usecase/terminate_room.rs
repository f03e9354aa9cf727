//! UseCase: ルーム終了処理
//!
//! ルーム作成者のみが実行できる。ステータスを TERMINATED に遷移させ、
//! ルームの全購読者に終了を 1 回だけ通知する。終了後のルームは履歴の
//! 閲覧のために参加可能なまま残る（レコードは削除しない）。

use std::sync::Arc;

use crate::domain::{
    DomainError, RepositoryError, RoomChannel, RoomId, RoomRepository, RoomStatus, Timestamp,
    UserId,
};

use super::error::TerminateError;

/// ルーム終了のユースケース
pub struct TerminateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// RoomChannel（ルーム単位の配信の抽象化）
    channel: Arc<dyn RoomChannel>,
}

impl TerminateRoomUseCase {
    /// 新しい TerminateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, channel: Arc<dyn RoomChannel>) -> Self {
        Self {
            repository,
            channel,
        }
    }

    /// ルーム終了を実行
    pub async fn execute(&self, actor: &UserId, room_id: &RoomId) -> Result<(), TerminateError> {
        use rondan_shared::time::get_jst_timestamp;

        // 1. ルームの存在と認可（作成者のみ）
        let room = self.repository.find_room(room_id).await.map_err(|e| match e {
            RepositoryError::RoomNotFound => TerminateError::RoomNotFound,
            other => TerminateError::Repository(other),
        })?;
        if &room.created_by != actor {
            return Err(TerminateError::Forbidden);
        }

        // 2. LIVE → TERMINATED（一方向、復帰しない）
        let now = Timestamp::new(get_jst_timestamp());
        self.repository
            .set_status(room_id, RoomStatus::Terminated, now)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound => TerminateError::RoomNotFound,
                RepositoryError::Domain(domain @ DomainError::InvalidStatusTransition { .. }) => {
                    TerminateError::InvalidTransition(domain)
                }
                other => TerminateError::Repository(other),
            })?;

        Ok(())
    }

    /// ルーム終了を全購読者にブロードキャストする
    pub async fn broadcast_room_terminated(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DebateType, Room, RoomFormat};
    use crate::infrastructure::channel::WebSocketRoomChannel;
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use rondan_shared::time::get_jst_timestamp;

    async fn create_test_fixture() -> (
        TerminateRoomUseCase,
        Arc<InMemoryRoomRepository>,
        Arc<WebSocketRoomChannel>,
        RoomId,
    ) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let channel = Arc::new(WebSocketRoomChannel::new());
        let room = Room::new(
            RoomId::new("room-1".to_string()).unwrap(),
            "topic".to_string(),
            "description".to_string(),
            "General".to_string(),
            RoomFormat::Debate,
            Some(DebateType::FreeForAll),
            UserId::new("creator".to_string()).unwrap(),
            2,
            Timestamp::new(get_jst_timestamp()),
        )
        .unwrap();
        let room_id = room.id.clone();
        repository.insert_room(room).await.unwrap();
        (
            TerminateRoomUseCase::new(repository.clone(), channel.clone()),
            repository,
            channel,
            room_id,
        )
    }

    #[tokio::test]
    async fn test_terminate_by_creator_sets_status() {
        // テスト項目: 作成者による終了でステータスが TERMINATED になる
        // given (前提条件):
        let (usecase, repository, _channel, room_id) = create_test_fixture().await;

        // when (操作):
        let creator = UserId::new("creator".to_string()).unwrap();
        let result = usecase.execute(&creator, &room_id).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let room = repository.find_room(&room_id).await.unwrap();
        assert_eq!(room.status, RoomStatus::Terminated);
    }

    #[tokio::test]
    async fn test_terminate_by_non_creator_is_forbidden() {
        // テスト項目: 作成者以外の終了は Forbidden になり、ステータスは変わらない
        // given (前提条件):
        let (usecase, repository, _channel, room_id) = create_test_fixture().await;

        // when (操作):
        let mallory = UserId::new("mallory".to_string()).unwrap();
        let result = usecase.execute(&mallory, &room_id).await;

        // then (期待する結果):
        assert_eq!(result, Err(TerminateError::Forbidden));
        let room = repository.find_room(&room_id).await.unwrap();
        assert_eq!(room.status, RoomStatus::Live);
    }

    #[tokio::test]
    async fn test_terminate_twice_fails() {
        // テスト項目: TERMINATED のルームを再度終了することはできない
        // given (前提条件):
        let (usecase, _repository, _channel, room_id) = create_test_fixture().await;
        let creator = UserId::new("creator".to_string()).unwrap();
        usecase.execute(&creator, &room_id).await.unwrap();

        // when (操作):
        let result = usecase.execute(&creator, &room_id).await;

        // then (期待する結果):
        assert!(matches!(result, Err(TerminateError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_terminate_broadcast_reaches_every_subscriber_once() {
        // テスト項目: 終了通知が各購読者にちょうど 1 回届く
        // given (前提条件):
        let (usecase, _repository, channel, room_id) = create_test_fixture().await;
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        channel.subscribe(&room_id, ConnectionId::generate(), tx1).await;
        channel.subscribe(&room_id, ConnectionId::generate(), tx2).await;

        // when (操作):
        let creator = UserId::new("creator".to_string()).unwrap();
        usecase.execute(&creator, &room_id).await.unwrap();
        usecase
            .broadcast_room_terminated(&room_id, r#"{"event":"roomTerminated"}"#)
            .await
            .unwrap();

        // then (期待する結果): 各購読者が 1 件だけ受け取る
        assert!(rx1.recv().await.unwrap().contains("roomTerminated"));
        assert!(rx2.recv().await.unwrap().contains("roomTerminated"));
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }
}
