//! UseCase: ルーム参加処理
//!
//! 検証の順序は固定: ルームの存在 → 再参加の冪等処理 → debater 定員 →
//! プライベートルームのパスワード → check 擬似ロール → 参加者エントリの置換。
//! 検証に失敗した場合、参加者リストは一切変更されない。
//!
//! エントリの置換は remove → append の 2 回の書き込みで行う。間で
//! クラッシュした場合は参加者が欠落する側に倒れる（重複はしない）。

use std::sync::Arc;

use crate::domain::{
    Participant, ParticipantRole, RepositoryError, Room, RoomId, RoomRepository, TeamSide,
    Timestamp, UserId, Username,
};
use crate::infrastructure::password::verify_password;

use super::error::JoinError;

/// 参加リクエストのロール
///
/// `Check` はパスワード検証のみを行い、参加者を追加しない擬似ロール。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRole {
    Debater,
    Audience,
    Check,
}

impl JoinRole {
    /// ワイヤ上の表記から変換する（未指定は audience）
    pub fn parse(value: Option<&str>) -> Result<Self, JoinError> {
        match value {
            None => Ok(Self::Audience),
            Some("debater") => Ok(Self::Debater),
            Some("audience") => Ok(Self::Audience),
            Some("check") => Ok(Self::Check),
            Some(other) => Err(JoinError::InvalidRole(other.to_string())),
        }
    }
}

/// 参加処理の結果
#[derive(Debug)]
pub enum JoinOutcome {
    /// 参加者として追加された（更新後のスナップショット）
    Joined(Room),
    /// 既に参加済み（冪等な再参加、現在のスナップショット）
    AlreadyJoined(Room),
    /// role = "check": パスワードのみ検証した
    PasswordValid,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功・冪等な再参加・パスワード検証のみ
    /// * `Err(JoinError)` - 検証失敗（参加者リストは変更されない）
    pub async fn execute(
        &self,
        user_id: UserId,
        username: Username,
        room_id: &RoomId,
        role: JoinRole,
        team: Option<TeamSide>,
        password: Option<&str>,
    ) -> Result<JoinOutcome, JoinError> {
        use rondan_shared::time::get_jst_timestamp;

        // (a) ルームの存在確認
        let room = self.repository.find_room(room_id).await.map_err(map_find)?;

        // (b) 既に参加済みなら冪等に現在のスナップショットを返す
        //     （定員・パスワードの再検証は行わない）
        if room.find_participant(&user_id).is_some() {
            return Ok(JoinOutcome::AlreadyJoined(room));
        }

        // (c) debater の定員チェック（audience は無制限）
        if role == JoinRole::Debater && room.debater_count() >= room.max_debaters {
            return Err(JoinError::RoomFull);
        }

        // (d) プライベートルームのパスワード検証
        if room.is_private {
            let supplied = password
                .filter(|p| !p.is_empty())
                .ok_or(JoinError::PasswordRequired)?;
            let stored = room
                .password_hash
                .as_deref()
                .ok_or(JoinError::PasswordRequired)?;
            if !verify_password(supplied, stored) {
                return Err(JoinError::IncorrectPassword);
            }
        }

        // (e) check 擬似ロールは参加者を追加しない
        if role == JoinRole::Check {
            return Ok(JoinOutcome::PasswordValid);
        }

        // team の指定は 2vs2 のルームでのみ有効
        if team.is_some() && room.debate_type != Some(crate::domain::DebateType::TwoVsTwo) {
            return Err(JoinError::InvalidTeam(
                "team assignment is only allowed in 2vs2 debate rooms".to_string(),
            ));
        }

        // (f) 古いエントリを消してから新しいエントリを追加する
        let now = Timestamp::new(get_jst_timestamp());
        let participant_role = match role {
            JoinRole::Debater => ParticipantRole::Debater,
            _ => ParticipantRole::Audience,
        };
        let participant = Participant::new(user_id.clone(), username, participant_role, team, now);

        self.repository
            .remove_participant(room_id, &user_id, now)
            .await
            .map_err(JoinError::Repository)?;
        self.repository
            .append_participant(room_id, participant, now)
            .await
            .map_err(JoinError::Repository)?;

        // (h) 更新後のスナップショットを返す（join はブロードキャストしない）
        let updated = self.repository.find_room(room_id).await.map_err(map_find)?;
        Ok(JoinOutcome::Joined(updated))
    }
}

fn map_find(e: RepositoryError) -> JoinError {
    match e {
        RepositoryError::RoomNotFound => JoinError::RoomNotFound,
        other => JoinError::Repository(other),
    }
}
