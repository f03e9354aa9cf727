//! UseCase 層
//!
//! ルームのメンバーシップ管理・メッセージ中継・ライフサイクル制御の
//! ビジネスロジック。Repository / RoomChannel の trait にのみ依存する。

mod create_room;
mod delete_room;
mod error;
mod get_room;
mod join_room;
mod kick_participant;
mod leave_room;
mod send_message;
mod terminate_room;

pub use create_room::{CreateRoomCommand, CreateRoomUseCase, TeamDefinition};
pub use delete_room::DeleteRoomUseCase;
pub use error::{
    CreateRoomError, DeleteRoomError, GetRoomError, JoinError, KickError, LeaveError,
    SendMessageError, TerminateError,
};
pub use get_room::GetRoomUseCase;
pub use join_room::{JoinOutcome, JoinRole, JoinRoomUseCase};
pub use kick_participant::KickParticipantUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use terminate_room::TerminateRoomUseCase;
