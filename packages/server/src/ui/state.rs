//! Server state and connection management.

use std::sync::Arc;

use crate::domain::RoomChannel;
use crate::infrastructure::session::SessionRegistry;
use crate::usecase::{
    CreateRoomUseCase, DeleteRoomUseCase, GetRoomUseCase, JoinRoomUseCase, KickParticipantUseCase,
    LeaveRoomUseCase, SendMessageUseCase, TerminateRoomUseCase,
};

use super::auth::JwtManager;

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetRoomUseCase（ルーム取得のユースケース）
    pub get_room_usecase: Arc<GetRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（退室のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// KickParticipantUseCase（キックのユースケース）
    pub kick_participant_usecase: Arc<KickParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// TerminateRoomUseCase（ルーム終了のユースケース）
    pub terminate_room_usecase: Arc<TerminateRoomUseCase>,
    /// DeleteRoomUseCase（ルーム削除のユースケース）
    pub delete_room_usecase: Arc<DeleteRoomUseCase>,
    /// Session Registry（接続 → セッションの対応表）
    pub session_registry: Arc<SessionRegistry>,
    /// RoomChannel（ルーム単位の配信の抽象化）
    pub channel: Arc<dyn RoomChannel>,
    /// JwtManager（bearer トークンの検証）
    pub jwt_manager: Arc<JwtManager>,
}
