//! UseCase 層のエラー型定義

use thiserror::Error;

use crate::domain::{DomainError, RepositoryError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("{0}")]
    Validation(String),

    #[error("room already exists")]
    DuplicateRoom,

    #[error("failed to hash room password")]
    PasswordHash,

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// ルーム取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomError {
    #[error("room not found")]
    RoomNotFound,

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("room not found")]
    RoomNotFound,

    #[error("room is full")]
    RoomFull,

    #[error("password is required for this private room")]
    PasswordRequired,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("invalid role '{0}'")]
    InvalidRole(String),

    #[error("invalid team '{0}'")]
    InvalidTeam(String),

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// 退室のエラー
///
/// 退室は冪等であり、ルームや参加者が存在しない場合は no-op になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("message content must not be empty")]
    Empty,

    #[error("room not found")]
    RoomNotFound,

    #[error("failed to persist message: {0}")]
    PersistFailure(String),
}

/// キックのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KickError {
    #[error("room not found")]
    RoomNotFound,

    #[error("only the room creator can kick users")]
    Forbidden,

    #[error("user not found in room")]
    UserNotFound,

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// ルーム終了のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerminateError {
    #[error("room not found")]
    RoomNotFound,

    #[error("only the room creator can terminate the room")]
    Forbidden,

    #[error(transparent)]
    InvalidTransition(DomainError),

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

/// ルーム削除のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteRoomError {
    #[error("room not found")]
    RoomNotFound,

    #[error("only the room creator can delete the room")]
    Forbidden,

    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}
