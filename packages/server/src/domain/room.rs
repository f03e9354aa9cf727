//! Room 集約
//!
//! 討論・投票セッションの集約ルート。参加者リスト・メッセージ履歴・
//! キック履歴・ステータス遷移の不変条件をこのモデルで守ります。
//!
//! ## 不変条件
//!
//! - format と debate_type は作成時に決まり、以後変更されない
//! - participants 内の userId は一意（再参加は置換であり重複しない）
//! - messages は追記専用で、追加後のエントリは不変
//! - team は 2vs2 のルームでのみ非 null
//! - ステータス遷移は一方向（SCHEDULED → LIVE → {ENDED, TERMINATED}）

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::value::{MessageContent, RoomId, Timestamp, UserId, Username};

/// ルームの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomFormat {
    Debate,
    Poll,
}

impl RoomFormat {
    /// ワイヤ上の表記（"debate" / "poll"）から変換する
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "debate" => Some(Self::Debate),
            "poll" => Some(Self::Poll),
            _ => None,
        }
    }
}

/// 討論ルームのサブタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateType {
    #[serde(rename = "2vs2")]
    TwoVsTwo,
    #[serde(rename = "freeForAll")]
    FreeForAll,
}

impl DebateType {
    /// ワイヤ上の表記（"2vs2" / "freeForAll"）から変換する
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "2vs2" => Some(Self::TwoVsTwo),
            "freeForAll" => Some(Self::FreeForAll),
            _ => None,
        }
    }
}

/// ルームのステータス
///
/// SCHEDULED は定義上存在するが、現在の作成経路からは生成されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Live,
    Ended,
    Terminated,
    Scheduled,
}

impl RoomStatus {
    /// ワイヤ上の表記（"LIVE" など）から変換する
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LIVE" => Some(Self::Live),
            "ENDED" => Some(Self::Ended),
            "TERMINATED" => Some(Self::Terminated),
            "SCHEDULED" => Some(Self::Scheduled),
            _ => None,
        }
    }
}

/// 参加者の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Debater,
    Audience,
}

/// チームの識別（2vs2 のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    /// ワイヤ上の表記（"team1" / "team2"）から変換する
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "team1" => Some(Self::Team1),
            "team2" => Some(Self::Team2),
            _ => None,
        }
    }
}

/// メッセージの種別
///
/// 送信者の申告値ではなく、送信時点の参加者ロールからサーバー側で導出される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Debate,
    Audience,
}

/// チーム（2vs2 のサブエンティティ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub description: String,
    pub members: Vec<UserId>,
    pub max_debaters: usize,
}

impl Team {
    pub fn new(name: String, description: String, max_debaters: usize) -> Self {
        Self {
            name,
            description,
            members: Vec::new(),
            max_debaters,
        }
    }
}

/// 参加者エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub username: Username,
    pub role: ParticipantRole,
    pub team: Option<TeamSide>,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(
        user_id: UserId,
        username: Username,
        role: ParticipantRole,
        team: Option<TeamSide>,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            username,
            role,
            team,
            joined_at,
        }
    }
}

/// メッセージ履歴のエントリ（追加後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: MessageContent,
    pub user_id: UserId,
    pub username: Username,
    pub kind: MessageKind,
    pub team: Option<TeamSide>,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        content: MessageContent,
        user_id: UserId,
        username: Username,
        kind: MessageKind,
        team: Option<TeamSide>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            content,
            user_id,
            username,
            kind,
            team,
            timestamp,
        }
    }
}

/// キック履歴のエントリ（追記専用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickedUser {
    pub user_id: UserId,
    pub username: Username,
    pub reason: String,
    pub timestamp: Timestamp,
}

/// Room 集約ルート
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub topic: String,
    pub description: String,
    pub category: String,
    pub format: RoomFormat,
    pub debate_type: Option<DebateType>,
    pub status: RoomStatus,
    pub created_by: UserId,
    pub is_private: bool,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub max_debaters: usize,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub participants: Vec<Participant>,
    pub messages: Vec<ChatMessage>,
    pub kicked_users: Vec<KickedUser>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Room {
    /// 新しい Room を作成（ステータスは LIVE）
    ///
    /// debate 形式のルームには debate_type が必須。
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RoomId,
        topic: String,
        description: String,
        category: String,
        format: RoomFormat,
        debate_type: Option<DebateType>,
        created_by: UserId,
        max_debaters: usize,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if format == RoomFormat::Debate && debate_type.is_none() {
            return Err(DomainError::DebateTypeRequired);
        }

        Ok(Self {
            id,
            topic,
            description,
            category,
            format,
            debate_type,
            status: RoomStatus::Live,
            created_by,
            is_private: false,
            password_hash: None,
            max_debaters,
            team1: None,
            team2: None,
            participants: Vec::new(),
            messages: Vec::new(),
            kicked_users: Vec::new(),
            created_at,
            updated_at: created_at,
        })
    }

    /// プライベートルームとしてパスワードハッシュを設定する
    pub fn with_password_hash(mut self, password_hash: String) -> Self {
        self.is_private = true;
        self.password_hash = Some(password_hash);
        self
    }

    /// 2vs2 用のチーム定義を設定する
    pub fn with_teams(mut self, team1: Team, team2: Team) -> Self {
        self.team1 = Some(team1);
        self.team2 = Some(team2);
        self
    }

    /// userId に一致する参加者エントリを探す
    pub fn find_participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user_id)
    }

    /// 役割が debater の参加者数
    pub fn debater_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.role == ParticipantRole::Debater)
            .count()
    }

    /// team の指定がこのルームで許されるか検証する
    fn validate_team(&self, team: Option<TeamSide>) -> Result<(), DomainError> {
        if team.is_some() && self.debate_type != Some(DebateType::TwoVsTwo) {
            return Err(DomainError::TeamNotAllowed);
        }
        Ok(())
    }

    /// 参加者を追加する
    ///
    /// 同じ userId のエントリが既に存在する場合はエラー。再参加の置換は
    /// Repository 層の remove → append で行う（クラッシュ時は重複より
    /// 欠落側に倒す）。
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self.find_participant(&participant.user_id).is_some() {
            return Err(DomainError::DuplicateParticipant(
                participant.user_id.as_str().to_string(),
            ));
        }
        self.validate_team(participant.team)?;

        self.participants.push(participant);
        Ok(())
    }

    /// userId に一致する参加者エントリを削除する（存在しなければ no-op）
    ///
    /// 削除が起きたかどうかを返す。
    pub fn remove_participant(&mut self, user_id: &UserId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| &p.user_id != user_id);
        self.participants.len() != before
    }

    /// メッセージ履歴に追記する（追記のみ、並べ替え・変更は不可）
    pub fn add_message(&mut self, message: ChatMessage) -> Result<(), DomainError> {
        self.validate_team(message.team)?;
        self.messages.push(message);
        Ok(())
    }

    /// キック履歴に追記する
    pub fn add_kicked_user(&mut self, kicked: KickedUser) {
        self.kicked_users.push(kicked);
    }

    /// ステータスを遷移させる
    ///
    /// 許される遷移: SCHEDULED → LIVE、LIVE → ENDED、LIVE → TERMINATED。
    /// ENDED / TERMINATED からの復帰はない。
    pub fn transition_status(&mut self, to: RoomStatus) -> Result<(), DomainError> {
        let allowed = matches!(
            (self.status, to),
            (RoomStatus::Scheduled, RoomStatus::Live)
                | (RoomStatus::Live, RoomStatus::Ended)
                | (RoomStatus::Live, RoomStatus::Terminated)
        );
        if !allowed {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// 更新時刻を進める
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room(format: RoomFormat, debate_type: Option<DebateType>) -> Room {
        Room::new(
            RoomId::new("room-1".to_string()).unwrap(),
            "Cats vs Dogs".to_string(),
            "The eternal question".to_string(),
            "Lifestyle".to_string(),
            format,
            debate_type,
            UserId::new("creator".to_string()).unwrap(),
            2,
            Timestamp::new(1000),
        )
        .unwrap()
    }

    fn participant(user_id: &str, role: ParticipantRole, team: Option<TeamSide>) -> Participant {
        Participant::new(
            UserId::new(user_id.to_string()).unwrap(),
            Username::new(user_id.to_string()).unwrap(),
            role,
            team,
            Timestamp::new(2000),
        )
    }

    #[test]
    fn test_debate_room_requires_debate_type() {
        // テスト項目: debate 形式で debate_type がない場合はエラーになる
        // given (前提条件):
        let result = Room::new(
            RoomId::new("room-1".to_string()).unwrap(),
            "topic".to_string(),
            "desc".to_string(),
            "General".to_string(),
            RoomFormat::Debate,
            None,
            UserId::new("creator".to_string()).unwrap(),
            2,
            Timestamp::new(1000),
        );

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), DomainError::DebateTypeRequired);
    }

    #[test]
    fn test_add_participant_rejects_duplicate_user_id() {
        // テスト項目: 同じ userId の参加者は重複して追加できない
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));
        room.add_participant(participant("alice", ParticipantRole::Debater, None))
            .unwrap();

        // when (操作):
        let result = room.add_participant(participant("alice", ParticipantRole::Audience, None));

        // then (期待する結果):
        assert!(matches!(result, Err(DomainError::DuplicateParticipant(_))));
        assert_eq!(room.participants.len(), 1);
    }

    #[test]
    fn test_team_only_allowed_in_2vs2() {
        // テスト項目: freeForAll のルームでは team を指定できない
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));

        // when (操作):
        let result = room.add_participant(participant(
            "alice",
            ParticipantRole::Debater,
            Some(TeamSide::Team1),
        ));

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::TeamNotAllowed));
    }

    #[test]
    fn test_team_allowed_in_2vs2() {
        // テスト項目: 2vs2 のルームでは team を指定できる
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::TwoVsTwo));

        // when (操作):
        let result = room.add_participant(participant(
            "alice",
            ParticipantRole::Debater,
            Some(TeamSide::Team1),
        ));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.participants[0].team, Some(TeamSide::Team1));
    }

    #[test]
    fn test_remove_participant_is_idempotent() {
        // テスト項目: 存在しない参加者の削除は no-op になる
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));
        let ghost = UserId::new("ghost".to_string()).unwrap();

        // when (操作):
        let removed = room.remove_participant(&ghost);

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(room.participants.len(), 0);
    }

    #[test]
    fn test_debater_count_ignores_audience() {
        // テスト項目: debater_count は audience を数えない
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));
        room.add_participant(participant("alice", ParticipantRole::Debater, None))
            .unwrap();
        room.add_participant(participant("bob", ParticipantRole::Audience, None))
            .unwrap();

        // when (操作):
        let count = room.debater_count();

        // then (期待する結果):
        assert_eq!(count, 1);
    }

    #[test]
    fn test_message_transcript_is_append_only() {
        // テスト項目: メッセージは末尾に追記され、既存エントリは変わらない
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));
        let first = ChatMessage::new(
            MessageContent::new("first".to_string()).unwrap(),
            UserId::new("alice".to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
            MessageKind::Debate,
            None,
            Timestamp::new(3000),
        );
        room.add_message(first.clone()).unwrap();

        // when (操作):
        let second = ChatMessage::new(
            MessageContent::new("second".to_string()).unwrap(),
            UserId::new("bob".to_string()).unwrap(),
            Username::new("bob".to_string()).unwrap(),
            MessageKind::Audience,
            None,
            Timestamp::new(4000),
        );
        room.add_message(second.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(room.messages.len(), 2);
        assert_eq!(room.messages[0], first);
        assert_eq!(room.messages[1], second);
    }

    #[test]
    fn test_status_transition_live_to_terminated() {
        // テスト項目: LIVE → TERMINATED の遷移は許される
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));

        // when (操作):
        let result = room.transition_status(RoomStatus::Terminated);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.status, RoomStatus::Terminated);
    }

    #[test]
    fn test_status_transition_is_one_directional() {
        // テスト項目: TERMINATED からの復帰は許されない
        // given (前提条件):
        let mut room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));
        room.transition_status(RoomStatus::Terminated).unwrap();

        // when (操作):
        let result = room.transition_status(RoomStatus::Live);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(DomainError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_private_room_holds_password_hash() {
        // テスト項目: with_password_hash でプライベートルームになる
        // given (前提条件):
        let room = test_room(RoomFormat::Debate, Some(DebateType::FreeForAll));

        // when (操作):
        let room = room.with_password_hash("$argon2id$dummy".to_string());

        // then (期待する結果):
        assert!(room.is_private);
        assert!(room.password_hash.is_some());
    }
}
