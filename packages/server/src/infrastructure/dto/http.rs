//! HTTP API の DTO 定義

use serde::{Deserialize, Serialize};

use crate::domain::{DebateType, MessageKind, ParticipantRole, RoomFormat, RoomStatus, TeamSide};

// ---------------------------------------------------------------------------
// requests
// ---------------------------------------------------------------------------

/// ルーム作成リクエスト
///
/// 必須フィールドの欠落は UseCase 層で検証し、400 を返す。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_id: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub format: Option<String>,
    pub debate_type: Option<String>,
    pub max_debaters: Option<usize>,
    pub is_private: Option<bool>,
    pub password: Option<String>,
    pub team1: Option<TeamDefinitionDto>,
    pub team2: Option<TeamDefinitionDto>,
}

/// 2vs2 用のチーム定義
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDefinitionDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_debaters: Option<usize>,
}

/// ルーム参加リクエスト
///
/// role = "check" はパスワード検証のみを行う擬似リクエスト。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub role: Option<String>,
    pub team: Option<String>,
    pub password: Option<String>,
}

/// キックリクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KickRequest {
    pub user_id: Option<String>,
    pub reason: Option<String>,
}

/// ルーム一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListRoomsQuery {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// responses
// ---------------------------------------------------------------------------

/// ルーム作成レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub success: bool,
    pub room_id: String,
}

/// 汎用の成功レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub success: bool,
    pub message: String,
}

/// ルーム参加レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSnapshotDto>,
}

/// ルーム取得レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub success: bool,
    pub room: RoomSnapshotDto,
}

/// ルーム一覧の要素
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub topic: String,
    pub description: String,
    pub category: String,
    pub format: RoomFormat,
    pub status: RoomStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debate_type: Option<DebateType>,
    pub max_debaters: usize,
    pub current_participants: usize,
    pub created_by: String,
    pub created_at: String,
}

/// ルームのスナップショット（参加者 + トランスクリプト + チーム状態）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub room_id: String,
    pub topic: String,
    pub description: String,
    pub category: String,
    pub format: RoomFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debate_type: Option<DebateType>,
    pub status: RoomStatus,
    pub created_by: String,
    pub is_private: bool,
    pub max_debaters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<TeamDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<TeamDto>,
    pub participants: Vec<ParticipantDto>,
    pub messages: Vec<MessageDto>,
    pub kicked_users: Vec<KickedUserDto>,
    pub created_at: String,
    pub updated_at: String,
}

/// チームの状態
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub max_debaters: usize,
}

/// 参加者エントリ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub user_id: String,
    pub username: String,
    pub role: ParticipantRole,
    pub team: Option<TeamSide>,
    pub joined_at: String,
}

/// トランスクリプトのエントリ
///
/// WebSocket の `message` イベントと同じ形。timestamp は JST ミリ秒。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub content: String,
    pub user_id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub team: Option<TeamSide>,
    pub timestamp: i64,
}

/// キック履歴のエントリ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KickedUserDto {
    pub user_id: String,
    pub username: String,
    pub reason: String,
    pub timestamp: i64,
}
