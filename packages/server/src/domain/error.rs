//! ドメイン層のエラー型定義

use thiserror::Error;

use super::room::RoomStatus;

/// ドメインモデルの不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("{0} exceeds the maximum length of {1}")]
    TooLong(&'static str, usize),

    #[error("participant '{0}' already exists in the room")]
    DuplicateParticipant(String),

    #[error("team assignment is only allowed in 2vs2 debate rooms")]
    TeamNotAllowed,

    #[error("debate type is required for debate rooms")]
    DebateTypeRequired,

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition { from: RoomStatus, to: RoomStatus },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room not found")]
    RoomNotFound,

    #[error("room '{0}' already exists")]
    DuplicateRoom(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// メッセージ配信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("connection '{0}' is not subscribed")]
    ConnectionNotFound(String),
}
