//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::domain::{RoomId, RoomStatus, TeamSide, UserId};
use crate::infrastructure::dto::http::{
    CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, JoinRoomResponse, KickRequest,
    ListRoomsQuery, RoomResponse, RoomSnapshotDto, RoomSummaryDto, SimpleResponse,
};
use crate::infrastructure::dto::websocket::{
    EventType, RoomTerminatedEvent, UserKickedEvent, UserLeftEvent,
};
use crate::usecase::{CreateRoomCommand, JoinOutcome, JoinRole, TeamDefinition};

use super::super::auth::Auth;
use super::super::error::ApiError;
use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a new room; the creator becomes its first participant
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    let command = CreateRoomCommand {
        room_id: request.room_id,
        topic: request.topic,
        description: request.description,
        category: request.category,
        format: request.format,
        debate_type: request.debate_type,
        max_debaters: request.max_debaters,
        is_private: request.is_private.unwrap_or(false),
        password: request.password,
        team1: request.team1.map(|t| TeamDefinition {
            name: t.name,
            description: t.description,
            max_debaters: t.max_debaters,
        }),
        team2: request.team2.map(|t| TeamDefinition {
            name: t.name,
            description: t.description,
            max_debaters: t.max_debaters,
        }),
    };

    let room_id = state
        .create_room_usecase
        .execute(user.user_id, user.username, command)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            success: true,
            room_id: room_id.as_str().to_string(),
        }),
    ))
}

/// List the caller's rooms, optionally filtered by status
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<RoomSummaryDto>>, ApiError> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(
            RoomStatus::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid status '{value}'")))?,
        ),
    };

    let rooms = state
        .get_room_usecase
        .list_by_creator(&user.user_id, status)
        .await?;

    Ok(Json(rooms.iter().map(RoomSummaryDto::from).collect()))
}

/// Fetch a room snapshot (participants, transcript, team state)
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Auth(_user): Auth,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let room = state.get_room_usecase.execute(&room_id).await?;

    Ok(Json(RoomResponse {
        success: true,
        room: RoomSnapshotDto::from(&room),
    }))
}

/// Join a room (role = "check" only validates the password)
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Path(room_id): Path<String>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let role = JoinRole::parse(request.role.as_deref())?;
    let team = match request.team.as_deref() {
        None => None,
        Some(value) => Some(
            TeamSide::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid team '{value}'")))?,
        ),
    };

    let outcome = state
        .join_room_usecase
        .execute(
            user.user_id,
            user.username,
            &room_id,
            role,
            team,
            request.password.as_deref(),
        )
        .await?;

    let response = match outcome {
        JoinOutcome::Joined(room) => JoinRoomResponse {
            success: true,
            message: "Successfully joined room".to_string(),
            room: Some(RoomSnapshotDto::from(&room)),
        },
        JoinOutcome::AlreadyJoined(room) => JoinRoomResponse {
            success: true,
            message: "Already in room".to_string(),
            room: Some(RoomSnapshotDto::from(&room)),
        },
        JoinOutcome::PasswordValid => JoinRoomResponse {
            success: true,
            message: "Password correct".to_string(),
            room: None,
        },
    };

    Ok(Json(response))
}

/// Leave a room (idempotent) and notify remaining subscribers
pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Path(room_id): Path<String>,
) -> Result<Json<SimpleResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    state
        .leave_room_usecase
        .execute(&user.user_id, &room_id)
        .await?;

    let event = UserLeftEvent::new(user.user_id.as_str().to_string());
    let payload = serde_json::to_string(&event).unwrap();
    if let Err(e) = state
        .leave_room_usecase
        .broadcast_user_left(&room_id, &payload)
        .await
    {
        tracing::warn!("Failed to broadcast user-left: {}", e);
    }

    Ok(Json(SimpleResponse {
        success: true,
        message: "Successfully left room".to_string(),
    }))
}

/// Kick a participant (creator only) and notify the room
pub async fn kick_user(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Path(room_id): Path<String>,
    Json(request): Json<KickRequest>,
) -> Result<Json<SimpleResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let target = request
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing userId".to_string()))?;
    let target_user_id =
        UserId::new(target).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let reason = request.reason.unwrap_or_default();

    let kicked = state
        .kick_participant_usecase
        .execute(&user.user_id, &room_id, target_user_id, reason)
        .await?;

    let event = UserKickedEvent {
        event: EventType::UserKicked,
        user_id: kicked.user_id.as_str().to_string(),
        username: kicked.username.as_str().to_string(),
        reason: kicked.reason.clone(),
        kicked_by: user.username.as_str().to_string(),
    };
    let payload = serde_json::to_string(&event).unwrap();
    if let Err(e) = state
        .kick_participant_usecase
        .broadcast_user_kicked(&room_id, &payload)
        .await
    {
        tracing::warn!("Failed to broadcast user-kicked: {}", e);
    }

    Ok(Json(SimpleResponse {
        success: true,
        message: "User kicked successfully".to_string(),
    }))
}

/// Terminate a room (creator only) and notify every subscriber
pub async fn terminate_room(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Path(room_id): Path<String>,
) -> Result<Json<SimpleResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    state
        .terminate_room_usecase
        .execute(&user.user_id, &room_id)
        .await?;

    let event = RoomTerminatedEvent {
        event: EventType::RoomTerminated,
        room_id: room_id.as_str().to_string(),
        terminated_by: user.username.as_str().to_string(),
    };
    let payload = serde_json::to_string(&event).unwrap();
    if let Err(e) = state
        .terminate_room_usecase
        .broadcast_room_terminated(&room_id, &payload)
        .await
    {
        tracing::warn!("Failed to broadcast room-terminated: {}", e);
    }

    Ok(Json(SimpleResponse {
        success: true,
        message: "Room terminated successfully".to_string(),
    }))
}

/// Hard-delete a room (creator only)
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Auth(user): Auth,
    Path(room_id): Path<String>,
) -> Result<Json<SimpleResponse>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    state
        .delete_room_usecase
        .execute(&user.user_id, &room_id)
        .await?;

    Ok(Json(SimpleResponse {
        success: true,
        message: "Room deleted successfully".to_string(),
    }))
}

fn parse_room_id(value: String) -> Result<RoomId, ApiError> {
    RoomId::new(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}
