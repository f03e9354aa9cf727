//! WebSocket のワイヤフォーマット定義
//!
//! すべてのイベントは `event` フィールドを判別子とする JSON オブジェクト。
//! 受信イベント（client → server）のうち `message` は roomId と content のみを
//! 信頼する。送信者の identity はセッションから、type / team は保存されている
//! 参加者エントリから導出するため、クライアントの申告値は無視される。

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, MessageKind, TeamSide};

use super::http::RoomSnapshotDto;

/// client → server のイベント
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinRoom { room_id: String },
    GetRoomData { room_id: String },
    Message { room_id: String, content: String },
    LeaveRoom { room_id: String },
}

/// server → client のイベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    JoinedRoom,
    RoomData,
    Message,
    MessageAck,
    UserLeft,
    UserKicked,
    RoomTerminated,
    Error,
}

/// joinRoom への応答
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRoomEvent {
    pub event: EventType,
    pub room_id: String,
    pub message: String,
}

impl JoinedRoomEvent {
    pub fn new(room_id: String) -> Self {
        Self {
            event: EventType::JoinedRoom,
            room_id,
            message: "Successfully joined room".to_string(),
        }
    }
}

/// getRoomData への応答
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDataEvent {
    pub event: EventType,
    pub room: RoomSnapshotDto,
}

impl RoomDataEvent {
    pub fn new(room: RoomSnapshotDto) -> Self {
        Self {
            event: EventType::RoomData,
            room,
        }
    }
}

/// チャットメッセージの配信イベント
///
/// 永続化されたトランスクリプトのエントリと同一の内容を持つ。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub event: EventType,
    pub content: String,
    pub user_id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub team: Option<TeamSide>,
    pub timestamp: i64,
}

impl From<&ChatMessage> for MessageEvent {
    fn from(message: &ChatMessage) -> Self {
        Self {
            event: EventType::Message,
            content: message.content.as_str().to_string(),
            user_id: message.user_id.as_str().to_string(),
            username: message.username.as_str().to_string(),
            kind: message.kind,
            team: message.team,
            timestamp: message.timestamp.value(),
        }
    }
}

/// message への送達応答（送信者にのみ返す）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAckEvent {
    pub event: EventType,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageAckEvent {
    pub fn ok() -> Self {
        Self {
            event: EventType::MessageAck,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            event: EventType::MessageAck,
            success: false,
            error: Some(error),
        }
    }
}

/// 参加者の退室通知
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftEvent {
    pub event: EventType,
    pub user_id: String,
}

impl UserLeftEvent {
    pub fn new(user_id: String) -> Self {
        Self {
            event: EventType::UserLeft,
            user_id,
        }
    }
}

/// キック通知
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKickedEvent {
    pub event: EventType,
    pub user_id: String,
    pub username: String,
    pub reason: String,
    pub kicked_by: String,
}

/// ルーム終了通知
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTerminatedEvent {
    pub event: EventType,
    pub room_id: String,
    pub terminated_by: String,
}

/// エラー通知（その接続にのみ返す）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub event: EventType,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            event: EventType::Error,
            message: message.into(),
        }
    }
}
