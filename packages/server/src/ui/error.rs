//! API error types.
//!
//! Usecase-level errors are mapped onto a single `ApiError` with a stable
//! machine-readable code. `INCORRECT_PASSWORD` shares the 401 status with
//! `UNAUTHORIZED` but keeps a distinct code so clients can tell a failed
//! private-room password check apart from an invalid session token.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::usecase::{
    CreateRoomError, DeleteRoomError, GetRoomError, JoinError, KickError, LeaveError,
    TerminateError,
};

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing/invalid/expired token
    #[error("{0}")]
    Unauthorized(String),

    /// Wrong password for a private room
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Private room joined without a password
    #[error("Password is required for this private room")]
    PasswordRequired,

    /// Debater capacity exceeded
    #[error("Room is full")]
    RoomFull,

    /// Non-creator attempting a creator-only operation
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Malformed payload or invalid enum value
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate resource
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::IncorrectPassword => StatusCode::UNAUTHORIZED,
            Self::PasswordRequired | Self::RoomFull | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable machine-readable error code.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",
            Self::PasswordRequired => "PASSWORD_REQUIRED",
            Self::RoomFull => "ROOM_FULL",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!("Internal server error: {}", detail);
        }

        let status = self.status_code();
        let body = ErrorResponse {
            status: "error",
            code: self.error_code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CreateRoomError> for ApiError {
    fn from(e: CreateRoomError) -> Self {
        match e {
            CreateRoomError::Validation(message) => Self::BadRequest(message),
            CreateRoomError::DuplicateRoom => Self::Conflict("Room already exists".to_string()),
            CreateRoomError::PasswordHash => Self::Internal("password hashing failed".to_string()),
            CreateRoomError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<GetRoomError> for ApiError {
    fn from(e: GetRoomError) -> Self {
        match e {
            GetRoomError::RoomNotFound => Self::NotFound("Room not found".to_string()),
            GetRoomError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        match e {
            JoinError::RoomNotFound => Self::NotFound("Room not found".to_string()),
            JoinError::RoomFull => Self::RoomFull,
            JoinError::PasswordRequired => Self::PasswordRequired,
            JoinError::IncorrectPassword => Self::IncorrectPassword,
            JoinError::InvalidRole(role) => Self::BadRequest(format!("Invalid role '{role}'")),
            JoinError::InvalidTeam(message) => Self::BadRequest(message),
            JoinError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<LeaveError> for ApiError {
    fn from(e: LeaveError) -> Self {
        match e {
            LeaveError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<KickError> for ApiError {
    fn from(e: KickError) -> Self {
        match e {
            KickError::RoomNotFound => Self::NotFound("Room not found".to_string()),
            KickError::Forbidden => {
                Self::Forbidden("Only room creator can kick users".to_string())
            }
            KickError::UserNotFound => Self::NotFound("User not found".to_string()),
            KickError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<TerminateError> for ApiError {
    fn from(e: TerminateError) -> Self {
        match e {
            TerminateError::RoomNotFound => Self::NotFound("Room not found".to_string()),
            TerminateError::Forbidden => {
                Self::Forbidden("Only room creator can terminate the room".to_string())
            }
            TerminateError::InvalidTransition(e) => Self::BadRequest(e.to_string()),
            TerminateError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<DeleteRoomError> for ApiError {
    fn from(e: DeleteRoomError) -> Self {
        match e {
            DeleteRoomError::RoomNotFound => Self::NotFound("Room not found".to_string()),
            DeleteRoomError::Forbidden => {
                Self::Forbidden("Only room creator can delete the room".to_string())
            }
            DeleteRoomError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}
