//! UseCase: メッセージ送信処理
//!
//! 検証 → 永続化 → 配信 → 送達応答の順序を守るプロトコルの中核。
//! メッセージの type / team はクライアントの申告値を使わず、送信時点の
//! 参加者エントリから導出する。永続化に失敗した場合は配信しない
//! （永続化されていない状態をワイヤに流さない）。

use std::sync::Arc;

use crate::domain::{
    ChatMessage, DebateType, MessageContent, MessageKind, ParticipantRole, RepositoryError,
    RoomChannel, RoomId, RoomRepository, TeamSide, Timestamp, UserId, Username,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// RoomChannel（ルーム単位の配信の抽象化）
    channel: Arc<dyn RoomChannel>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, channel: Arc<dyn RoomChannel>) -> Self {
        Self {
            repository,
            channel,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 永続化されたメッセージ（配信ペイロードの元になる）
    /// * `Err(SendMessageError)` - 検証失敗または永続化失敗（配信は行われない）
    pub async fn execute(
        &self,
        user_id: UserId,
        username: Username,
        room_id: &RoomId,
        content: String,
    ) -> Result<ChatMessage, SendMessageError> {
        use rondan_shared::time::get_jst_timestamp;

        // 1. 内容の検証
        let content = MessageContent::new(content).map_err(|_| SendMessageError::Empty)?;

        // 2. ルームの存在確認
        let room = self
            .repository
            .find_room(room_id)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound => SendMessageError::RoomNotFound,
                other => SendMessageError::PersistFailure(other.to_string()),
            })?;

        // 3. type / team を保存されている参加者エントリから導出する
        let participant = room.find_participant(&user_id);
        let kind = match room.debate_type {
            // freeForAll は audience / debater の区別なく単一の debate ストリーム
            Some(DebateType::FreeForAll) => MessageKind::Debate,
            _ => match participant.map(|p| p.role) {
                Some(ParticipantRole::Debater) => MessageKind::Debate,
                _ => MessageKind::Audience,
            },
        };
        let team: Option<TeamSide> = participant.and_then(|p| p.team);

        // 4. トランスクリプトへ追記（配信より先に永続化する）
        let timestamp = Timestamp::new(get_jst_timestamp());
        let message = ChatMessage::new(content, user_id, username, kind, team, timestamp);
        self.repository
            .append_message(room_id, message.clone(), timestamp)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound => SendMessageError::RoomNotFound,
                other => SendMessageError::PersistFailure(other.to_string()),
            })?;

        Ok(message)
    }

    /// 永続化済みメッセージをルームの全購読者（送信者を含む）に配信する
    pub async fn broadcast_message(
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
    use crate::domain::{ConnectionId, Participant, Room, RoomFormat};
    use crate::infrastructure::channel::WebSocketRoomChannel;
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use rondan_shared::time::get_jst_timestamp;

    fn test_room(debate_type: DebateType) -> Room {
        Room::new(
            RoomId::new("room-1".to_string()).unwrap(),
            "topic".to_string(),
            "description".to_string(),
            "General".to_string(),
            RoomFormat::Debate,
            Some(debate_type),
            UserId::new("creator".to_string()).unwrap(),
            4,
            Timestamp::new(get_jst_timestamp()),
        )
        .unwrap()
    }

    async fn create_test_fixture(
        debate_type: DebateType,
    ) -> (
        SendMessageUseCase,
        Arc<InMemoryRoomRepository>,
        Arc<WebSocketRoomChannel>,
        RoomId,
    ) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let channel = Arc::new(WebSocketRoomChannel::new());
        let room = test_room(debate_type);
        let room_id = room.id.clone();
        repository.insert_room(room).await.unwrap();
        (
            SendMessageUseCase::new(repository.clone(), channel.clone()),
            repository,
            channel,
            room_id,
        )
    }

    async fn add_participant(
        repository: &InMemoryRoomRepository,
        room_id: &RoomId,
        name: &str,
        role: ParticipantRole,
        team: Option<TeamSide>,
    ) {
        let now = Timestamp::new(get_jst_timestamp());
        repository
            .append_participant(
                room_id,
                Participant::new(
                    UserId::new(name.to_string()).unwrap(),
                    Username::new(name.to_string()).unwrap(),
                    role,
                    team,
                    now,
                ),
                now,
            )
            .await
            .unwrap();
    }

    fn sender(name: &str) -> (UserId, Username) {
        (
            UserId::new(name.to_string()).unwrap(),
            Username::new(name.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_send_message_appends_to_transcript() {
        // テスト項目: 送信後のトランスクリプト長が 1 増え、末尾が返却値と一致する
        // given (前提条件):
        let (usecase, repository, _channel, room_id) =
            create_test_fixture(DebateType::FreeForAll).await;
        add_participant(&repository, &room_id, "alice", ParticipantRole::Debater, None).await;

        // when (操作):
        let (user_id, username) = sender("alice");
        let result = usecase
            .execute(user_id, username, &room_id, "hello".to_string())
            .await;

        // then (期待する結果):
        let message = result.unwrap();
        let room = repository.find_room(&room_id).await.unwrap();
        assert_eq!(room.messages.len(), 1);
        assert_eq!(room.messages[0], message);
        assert_eq!(message.content.as_str(), "hello");
    }

    #[tokio::test]
    async fn test_send_message_rejects_blank_content() {
        // テスト項目: 空白のみのメッセージは Empty で拒否され、トランスクリプトは変わらない
        // given (前提条件):
        let (usecase, repository, _channel, room_id) =
            create_test_fixture(DebateType::FreeForAll).await;

        // when (操作):
        let (user_id, username) = sender("alice");
        let result = usecase
            .execute(user_id, username, &room_id, "   ".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::Empty));
        let room = repository.find_room(&room_id).await.unwrap();
        assert_eq!(room.messages.len(), 0);
    }

    #[tokio::test]
    async fn test_send_message_room_not_found() {
        // テスト項目: 存在しないルームへの送信は RoomNotFound になる
        // given (前提条件):
        let (usecase, _repository, _channel, _room_id) =
            create_test_fixture(DebateType::FreeForAll).await;

        // when (操作):
        let (user_id, username) = sender("alice");
        let missing = RoomId::new("missing".to_string()).unwrap();
        let result = usecase
            .execute(user_id, username, &missing, "hello".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::RoomNotFound));
    }

    #[tokio::test]
    async fn test_message_kind_derived_from_stored_role() {
        // テスト項目: 2vs2 では type が保存されているロールから導出される
        // given (前提条件):
        let (usecase, repository, _channel, room_id) =
            create_test_fixture(DebateType::TwoVsTwo).await;
        add_participant(
            &repository,
            &room_id,
            "alice",
            ParticipantRole::Debater,
            Some(TeamSide::Team1),
        )
        .await;
        add_participant(&repository, &room_id, "bob", ParticipantRole::Audience, None).await;

        // when (操作):
        let (alice_id, alice_name) = sender("alice");
        let from_debater = usecase
            .execute(alice_id, alice_name, &room_id, "point".to_string())
            .await
            .unwrap();
        let (bob_id, bob_name) = sender("bob");
        let from_audience = usecase
            .execute(bob_id, bob_name, &room_id, "comment".to_string())
            .await
            .unwrap();

        // then (期待する結果): debater は debate / team1、audience は audience
        assert_eq!(from_debater.kind, MessageKind::Debate);
        assert_eq!(from_debater.team, Some(TeamSide::Team1));
        assert_eq!(from_audience.kind, MessageKind::Audience);
        assert_eq!(from_audience.team, None);
    }

    #[tokio::test]
    async fn test_free_for_all_is_single_debate_stream() {
        // テスト項目: freeForAll では audience の発言も debate として流れる
        // given (前提条件):
        let (usecase, repository, _channel, room_id) =
            create_test_fixture(DebateType::FreeForAll).await;
        add_participant(&repository, &room_id, "bob", ParticipantRole::Audience, None).await;

        // when (操作):
        let (user_id, username) = sender("bob");
        let message = usecase
            .execute(user_id, username, &room_id, "hi".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.kind, MessageKind::Debate);
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_all_subscribers_including_sender() {
        // テスト項目: 配信は送信者を含む全ての購読者に届く
        // given (前提条件):
        let (usecase, repository, channel, room_id) =
            create_test_fixture(DebateType::FreeForAll).await;
        add_participant(&repository, &room_id, "alice", ParticipantRole::Debater, None).await;

        let (tx_sender, mut rx_sender) = tokio::sync::mpsc::unbounded_channel();
        let (tx_other, mut rx_other) = tokio::sync::mpsc::unbounded_channel();
        channel
            .subscribe(&room_id, ConnectionId::generate(), tx_sender)
            .await;
        channel
            .subscribe(&room_id, ConnectionId::generate(), tx_other)
            .await;

        // when (操作): 永続化 → 配信
        let (user_id, username) = sender("alice");
        let message = usecase
            .execute(user_id, username, &room_id, "hello".to_string())
            .await
            .unwrap();
        let payload = serde_json::to_string(
            &crate::infrastructure::dto::websocket::MessageEvent::from(&message),
        )
        .unwrap();
        usecase.broadcast_message(&room_id, &payload).await.unwrap();

        // then (期待する結果): 両方の購読者が同一のペイロードを受け取る
        let to_sender = rx_sender.recv().await.unwrap();
        let to_other = rx_other.recv().await.unwrap();
        assert_eq!(to_sender, payload);
        assert_eq!(to_other, payload);

        // ペイロードはトランスクリプトの末尾と同じ内容
        let room = repository.find_room(&room_id).await.unwrap();
        let last = room.messages.last().unwrap();
        assert_eq!(last, &message);
    }
}
