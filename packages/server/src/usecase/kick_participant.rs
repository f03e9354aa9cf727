//! UseCase: 参加者キック処理
//!
//! ルーム作成者のみが実行できる。対象の参加者エントリを削除し、
//! キック履歴に追記してからルームに通知する。
//! キックされたユーザーの参加者エントリは保持されない。

use std::sync::Arc;

use crate::domain::{
    KickedUser, RepositoryError, RoomChannel, RoomId, RoomRepository, Timestamp, UserId,
};

use super::error::KickError;

/// 参加者キックのユースケース
pub struct KickParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// RoomChannel（ルーム単位の配信の抽象化）
    channel: Arc<dyn RoomChannel>,
}

impl KickParticipantUseCase {
    /// 新しい KickParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, channel: Arc<dyn RoomChannel>) -> Self {
        Self {
            repository,
            channel,
        }
    }

    /// キックを実行
    ///
    /// # Returns
    ///
    /// * `Ok(KickedUser)` - 追記されたキック履歴のエントリ
    /// * `Err(KickError)` - 認可失敗・対象不在など（参加者リストは変更されない）
    pub async fn execute(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        target_user_id: UserId,
        reason: String,
    ) -> Result<KickedUser, KickError> {
        use rondan_shared::time::get_jst_timestamp;

        // 1. ルームの存在と認可（作成者のみ）
        let room = self.repository.find_room(room_id).await.map_err(|e| match e {
            RepositoryError::RoomNotFound => KickError::RoomNotFound,
            other => KickError::Repository(other),
        })?;
        if &room.created_by != actor {
            return Err(KickError::Forbidden);
        }

        // 2. 対象の参加者エントリを探す
        let target = room
            .find_participant(&target_user_id)
            .ok_or(KickError::UserNotFound)?;
        let username = target.username.clone();

        // 3. 参加者エントリを削除し、キック履歴へ追記する
        let now = Timestamp::new(get_jst_timestamp());
        self.repository
            .remove_participant(room_id, &target_user_id, now)
            .await
            .map_err(KickError::Repository)?;

        let kicked = KickedUser {
            user_id: target_user_id,
            username,
            reason,
            timestamp: now,
        };
        self.repository
            .append_kicked_user(room_id, kicked.clone(), now)
            .await
            .map_err(KickError::Repository)?;

        Ok(kicked)
    }

    /// キックをルームの購読者にブロードキャストする
    pub async fn broadcast_user_kicked(
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
    use crate::domain::{
        ConnectionId, DebateType, MessagePushError, Participant, ParticipantRole, PusherChannel,
        Room, RoomFormat, Username,
    };
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use rondan_shared::time::get_jst_timestamp;

    mockall::mock! {
        Channel {}

        #[async_trait::async_trait]
        impl RoomChannel for Channel {
            async fn subscribe(
                &self,
                room_id: &RoomId,
                connection_id: ConnectionId,
                sender: PusherChannel,
            );
            async fn unsubscribe(&self, room_id: &RoomId, connection_id: &ConnectionId);
            async fn unsubscribe_all(&self, connection_id: &ConnectionId);
            async fn publish(&self, room_id: &RoomId, payload: &str)
                -> Result<(), MessagePushError>;
        }
    }

    async fn create_test_repository_with_room() -> (Arc<InMemoryRoomRepository>, RoomId) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = Room::new(
            RoomId::new("room-1".to_string()).unwrap(),
            "topic".to_string(),
            "description".to_string(),
            "General".to_string(),
            RoomFormat::Debate,
            Some(DebateType::FreeForAll),
            UserId::new("creator".to_string()).unwrap(),
            4,
            Timestamp::new(get_jst_timestamp()),
        )
        .unwrap();
        let room_id = room.id.clone();
        repository.insert_room(room).await.unwrap();
        (repository, room_id)
    }

    async fn add_participant(repository: &InMemoryRoomRepository, room_id: &RoomId, name: &str) {
        let now = Timestamp::new(get_jst_timestamp());
        repository
            .append_participant(
                room_id,
                Participant::new(
                    UserId::new(name.to_string()).unwrap(),
                    Username::new(name.to_string()).unwrap(),
                    ParticipantRole::Debater,
                    None,
                    now,
                ),
                now,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_kick_by_creator_success() {
        // テスト項目: 作成者によるキックで参加者が削除され、履歴に追記される
        // given (前提条件):
        let (repository, room_id) = create_test_repository_with_room().await;
        add_participant(&repository, &room_id, "bob").await;
        let usecase =
            KickParticipantUseCase::new(repository.clone(), Arc::new(MockChannel::new()));

        // when (操作):
        let creator = UserId::new("creator".to_string()).unwrap();
        let bob = UserId::new("bob".to_string()).unwrap();
        let result = usecase
            .execute(&creator, &room_id, bob.clone(), "spam".to_string())
            .await;

        // then (期待する結果):
        let kicked = result.unwrap();
        assert_eq!(kicked.user_id, bob);
        assert_eq!(kicked.reason, "spam");

        let room = repository.find_room(&room_id).await.unwrap();
        assert!(room.find_participant(&bob).is_none());
        assert_eq!(room.kicked_users.len(), 1);
        assert_eq!(room.kicked_users[0].user_id, bob);
    }

    #[tokio::test]
    async fn test_kick_by_non_creator_is_forbidden() {
        // テスト項目: 作成者以外のキックは Forbidden になり、参加者は変更されない
        // given (前提条件):
        let (repository, room_id) = create_test_repository_with_room().await;
        add_participant(&repository, &room_id, "bob").await;
        let usecase =
            KickParticipantUseCase::new(repository.clone(), Arc::new(MockChannel::new()));

        // when (操作):
        let mallory = UserId::new("mallory".to_string()).unwrap();
        let bob = UserId::new("bob".to_string()).unwrap();
        let result = usecase
            .execute(&mallory, &room_id, bob.clone(), "grudge".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(KickError::Forbidden));
        let room = repository.find_room(&room_id).await.unwrap();
        assert!(room.find_participant(&bob).is_some());
        assert_eq!(room.kicked_users.len(), 0);
    }

    #[tokio::test]
    async fn test_kick_unknown_target_fails() {
        // テスト項目: ルームにいないユーザーのキックは UserNotFound になる
        // given (前提条件):
        let (repository, room_id) = create_test_repository_with_room().await;
        let usecase = KickParticipantUseCase::new(repository, Arc::new(MockChannel::new()));

        // when (操作):
        let creator = UserId::new("creator".to_string()).unwrap();
        let ghost = UserId::new("ghost".to_string()).unwrap();
        let result = usecase
            .execute(&creator, &room_id, ghost, "spam".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(KickError::UserNotFound));
    }

    #[tokio::test]
    async fn test_broadcast_user_kicked_publishes_once() {
        // テスト項目: キックの通知がルームのチャンネルに 1 回だけ publish される
        // given (前提条件):
        let (repository, room_id) = create_test_repository_with_room().await;
        let mut channel = MockChannel::new();
        channel
            .expect_publish()
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = KickParticipantUseCase::new(repository, Arc::new(channel));

        // when (操作):
        let result = usecase
            .broadcast_user_kicked(&room_id, r#"{"event":"userKicked"}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
