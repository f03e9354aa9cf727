//! WebSocket connection handlers.
//!
//! The handshake carries a bearer token in the `token` query parameter.
//! Verification happens before the upgrade completes; no event is accepted
//! from an unauthenticated connection. Each accepted connection gets a
//! `Session` in the registry, torn down in one place on disconnect.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::domain::{ConnectionId, PusherChannel, RoomId, Session, UserId, Username};
use crate::infrastructure::dto::http::RoomSnapshotDto;
use crate::infrastructure::dto::websocket::{
    ClientEvent, ErrorEvent, JoinedRoomEvent, MessageAckEvent, MessageEvent, RoomDataEvent,
};
use crate::usecase::GetRoomError;

use super::super::state::AppState;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Authentication error before any event is accepted
    let claims = match state.jwt_manager.verify(&query.token) {
        Ok(claims) => claims,
        Err(_) => {
            tracing::warn!("WebSocket handshake rejected: invalid token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let (user_id, username) = match (
        UserId::try_from(claims.sub),
        Username::try_from(claims.username),
    ) {
        (Ok(user_id), Ok(username)) => (user_id, username),
        _ => {
            tracing::warn!("WebSocket handshake rejected: malformed identity claims");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this connection to receive published events
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    state
        .session_registry
        .insert(Session::new(
            connection_id.clone(),
            user_id.clone(),
            username.clone(),
        ))
        .await;
    tracing::info!(
        "Connection '{}' authenticated as '{}'",
        connection_id,
        user_id.as_str()
    );

    Ok(ws.on_upgrade(move |socket| {
        handle_socket(socket, state, connection_id, user_id, username, tx, rx)
    }))
}

/// Spawns a task that receives published events from the rx channel and
/// pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    user_id: UserId,
    username: Username,
    tx: PusherChannel,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    // Outbound: everything this connection should see flows through tx → socket
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_clone = connection_id.clone();
    let user_clone = user_id.clone();
    let username_clone = username.clone();

    // Inbound: events from this client, processed in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to parse client event: {}", e);
                            push(&tx, &ErrorEvent::new("Invalid event payload"));
                            continue;
                        }
                    };

                    handle_client_event(
                        &state_clone,
                        &connection_clone,
                        &user_clone,
                        &username_clone,
                        &tx,
                        event,
                    )
                    .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Teardown: implicit leave for the room the session was in, then the
    // channel-level cleanup safety net. Runs exactly once per connection.
    if let Some(session) = state.session_registry.remove(&connection_id).await {
        if let Some(room_id) = session.current_room {
            match state
                .leave_room_usecase
                .execute(&session.user_id, &room_id)
                .await
            {
                Ok(()) => {
                    let event = crate::infrastructure::dto::websocket::UserLeftEvent::new(
                        session.user_id.as_str().to_string(),
                    );
                    let payload = serde_json::to_string(&event).unwrap();
                    if let Err(e) = state
                        .leave_room_usecase
                        .broadcast_user_left(&room_id, &payload)
                        .await
                    {
                        tracing::warn!("Failed to broadcast user-left on disconnect: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Implicit leave failed on disconnect: {}", e);
                }
            }
        }
    }
    state.channel.unsubscribe_all(&connection_id).await;
    tracing::info!("Connection '{}' disconnected and cleaned up", connection_id);
}

async fn handle_client_event(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    user_id: &UserId,
    username: &Username,
    tx: &PusherChannel,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            let Some(room_id) = parse_room_id(room_id, tx) else {
                return;
            };

            // The room must exist before the connection is subscribed
            match state.get_room_usecase.execute(&room_id).await {
                Ok(_) => {
                    state
                        .channel
                        .subscribe(&room_id, connection_id.clone(), tx.clone())
                        .await;
                    state
                        .session_registry
                        .set_current_room(connection_id, Some(room_id.clone()))
                        .await;
                    tracing::info!(
                        "Connection '{}' joined room '{}'",
                        connection_id,
                        room_id.as_str()
                    );
                    push(tx, &JoinedRoomEvent::new(room_id.as_str().to_string()));
                }
                Err(GetRoomError::RoomNotFound) => {
                    push(tx, &ErrorEvent::new("Room not found"));
                }
                Err(e) => {
                    tracing::error!("Failed to join room: {}", e);
                    push(tx, &ErrorEvent::new("Failed to join room"));
                }
            }
        }
        ClientEvent::GetRoomData { room_id } => {
            let Some(room_id) = parse_room_id(room_id, tx) else {
                return;
            };

            match state.get_room_usecase.execute(&room_id).await {
                Ok(room) => {
                    push(tx, &RoomDataEvent::new(RoomSnapshotDto::from(&room)));
                }
                Err(GetRoomError::RoomNotFound) => {
                    push(tx, &ErrorEvent::new("Room not found"));
                }
                Err(e) => {
                    tracing::error!("Failed to fetch room data: {}", e);
                    push(tx, &ErrorEvent::new("Failed to fetch room data"));
                }
            }
        }
        ClientEvent::Message { room_id, content } => {
            let Some(room_id) = parse_room_id(room_id, tx) else {
                return;
            };

            // Persist first; only a durable message is broadcast and acked
            match state
                .send_message_usecase
                .execute(user_id.clone(), username.clone(), &room_id, content)
                .await
            {
                Ok(message) => {
                    let payload =
                        serde_json::to_string(&MessageEvent::from(&message)).unwrap();
                    if let Err(e) = state
                        .send_message_usecase
                        .broadcast_message(&room_id, &payload)
                        .await
                    {
                        tracing::warn!("Failed to broadcast message: {}", e);
                    }
                    push(tx, &MessageAckEvent::ok());
                }
                Err(e) => {
                    tracing::warn!("Message rejected: {}", e);
                    push(tx, &MessageAckEvent::failed(e.to_string()));
                }
            }
        }
        ClientEvent::LeaveRoom { room_id } => {
            let Some(room_id) = parse_room_id(room_id, tx) else {
                return;
            };

            match state.leave_room_usecase.execute(user_id, &room_id).await {
                Ok(()) => {
                    let event = crate::infrastructure::dto::websocket::UserLeftEvent::new(
                        user_id.as_str().to_string(),
                    );
                    let payload = serde_json::to_string(&event).unwrap();
                    if let Err(e) = state
                        .leave_room_usecase
                        .broadcast_user_left(&room_id, &payload)
                        .await
                    {
                        tracing::warn!("Failed to broadcast user-left: {}", e);
                    }
                    state.channel.unsubscribe(&room_id, connection_id).await;
                    state
                        .session_registry
                        .set_current_room(connection_id, None)
                        .await;
                }
                Err(e) => {
                    tracing::warn!("Leave failed: {}", e);
                    push(tx, &ErrorEvent::new("Failed to leave room"));
                }
            }
        }
    }
}

/// Queue an event for this connection (delivered by the pusher loop).
fn push<T: serde::Serialize>(tx: &PusherChannel, event: &T) {
    let payload = serde_json::to_string(event).unwrap();
    if tx.send(payload).is_err() {
        tracing::warn!("Failed to queue event: connection channel closed");
    }
}

fn parse_room_id(value: String, tx: &PusherChannel) -> Option<RoomId> {
    match RoomId::try_from(value) {
        Ok(room_id) => Some(room_id),
        Err(_) => {
            push(tx, &ErrorEvent::new("Invalid room id"));
            None
        }
    }
}
