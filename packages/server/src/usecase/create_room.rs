//! UseCase: ルーム作成処理
//!
//! リクエストの検証・パスワードのハッシュ化・Room の永続化を行い、
//! 作成者を最初の参加者（debater）として登録する。
//!
//! Room の insert と作成者の append は 2 回の書き込みに分かれる。
//! 間でクラッシュした場合は「参加者のいないルーム」が残る側に倒れる
//! （重複参加者が残る側には決して倒れない）。

use std::sync::Arc;

use crate::domain::{
    DebateType, Participant, ParticipantRole, Room, RoomFormat, RoomId, RoomIdFactory,
    RoomRepository, RepositoryError, Team, Timestamp, UserId, Username,
};
use crate::infrastructure::password::hash_password;

use super::error::CreateRoomError;

/// ルーム作成の入力
#[derive(Debug, Default)]
pub struct CreateRoomCommand {
    pub room_id: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub format: Option<String>,
    pub debate_type: Option<String>,
    pub max_debaters: Option<usize>,
    pub is_private: bool,
    pub password: Option<String>,
    pub team1: Option<TeamDefinition>,
    pub team2: Option<TeamDefinition>,
}

/// 2vs2 用のチーム定義
#[derive(Debug, Default)]
pub struct TeamDefinition {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_debaters: Option<usize>,
}

impl TeamDefinition {
    /// name / description が揃っていれば Team に変換する
    fn into_team(self) -> Option<Team> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let description = self.description.filter(|d| !d.trim().is_empty())?;
        Some(Team::new(name, description, self.max_debaters.unwrap_or(2)))
    }
}

/// デフォルトの debater 定員（freeForAll / poll）
const DEFAULT_MAX_DEBATERS: usize = 2;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomId)` - 作成されたルームの ID
    /// * `Err(CreateRoomError)` - 検証エラーまたは永続化失敗
    pub async fn execute(
        &self,
        creator: UserId,
        creator_name: Username,
        command: CreateRoomCommand,
    ) -> Result<RoomId, CreateRoomError> {
        use rondan_shared::time::get_jst_timestamp;

        // 1. 必須フィールドの検証
        let topic = required_field(command.topic)?;
        let description = required_field(command.description)?;
        let category = required_field(command.category)?;
        let format_str = required_field(command.format)?;

        let format = RoomFormat::parse(&format_str)
            .ok_or_else(|| CreateRoomError::Validation("Invalid room format".to_string()))?;

        // 2. debate 形式にはサブタイプが必須
        let debate_type = match (format, command.debate_type) {
            (RoomFormat::Debate, None) => {
                return Err(CreateRoomError::Validation(
                    "Debate type is required for debate rooms".to_string(),
                ));
            }
            (RoomFormat::Debate, Some(value)) => Some(DebateType::parse(&value).ok_or_else(
                || CreateRoomError::Validation("Invalid debate type".to_string()),
            )?),
            (RoomFormat::Poll, _) => None,
        };

        // 3. 2vs2 にはチーム定義が必須
        let (team1, team2) = if debate_type == Some(DebateType::TwoVsTwo) {
            let team1 = command.team1.and_then(TeamDefinition::into_team);
            let team2 = command.team2.and_then(TeamDefinition::into_team);
            match (team1, team2) {
                (Some(t1), Some(t2)) => (Some(t1), Some(t2)),
                _ => {
                    return Err(CreateRoomError::Validation(
                        "Team names and descriptions are required for 2vs2 debates".to_string(),
                    ));
                }
            }
        } else {
            (None, None)
        };

        // 4. プライベートルームのパスワードをハッシュ化
        let password_hash = if command.is_private {
            let password = command
                .password
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    CreateRoomError::Validation(
                        "Password is required for private rooms".to_string(),
                    )
                })?;
            Some(hash_password(&password).map_err(|_| CreateRoomError::PasswordHash)?)
        } else {
            None
        };

        // 5. ルーム ID（クライアント指定がなければ生成）
        let room_id = match command.room_id {
            Some(value) => RoomId::new(value)
                .map_err(|e| CreateRoomError::Validation(e.to_string()))?,
            None => RoomIdFactory::generate()
                .map_err(|e| CreateRoomError::Validation(e.to_string()))?,
        };

        // 6. debater 定員（2vs2 はチーム定員の合計がデフォルト）
        let max_debaters = command.max_debaters.unwrap_or_else(|| match (&team1, &team2) {
            (Some(t1), Some(t2)) => t1.max_debaters + t2.max_debaters,
            _ => DEFAULT_MAX_DEBATERS,
        });

        // 7. Room を組み立てて保存
        let now = Timestamp::new(get_jst_timestamp());
        let mut room = Room::new(
            room_id.clone(),
            topic,
            description,
            category,
            format,
            debate_type,
            creator.clone(),
            max_debaters,
            now,
        )
        .map_err(|e| CreateRoomError::Validation(e.to_string()))?;

        if let (Some(t1), Some(t2)) = (team1, team2) {
            room = room.with_teams(t1, t2);
        }
        if let Some(hash) = password_hash {
            room = room.with_password_hash(hash);
        }

        self.repository.insert_room(room).await.map_err(|e| match e {
            RepositoryError::DuplicateRoom(_) => CreateRoomError::DuplicateRoom,
            other => CreateRoomError::Repository(other),
        })?;

        // 8. 作成者を最初の参加者として登録（insert とは別の書き込み）
        let participant = Participant::new(
            creator,
            creator_name,
            ParticipantRole::Debater,
            None,
            now,
        );
        self.repository
            .append_participant(&room_id, participant, now)
            .await
            .map_err(CreateRoomError::Repository)?;

        Ok(room_id)
    }
}

fn required_field(value: Option<String>) -> Result<String, CreateRoomError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CreateRoomError::Validation("Missing required fields".to_string()))
}
