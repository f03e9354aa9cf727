//! ドメイン層
//!
//! 討論ルームのドメインモデル（エンティティ・値オブジェクト）と、
//! ドメイン層が必要とするインターフェース（Repository / RoomChannel）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

mod channel;
mod error;
mod repository;
mod room;
mod session;
mod value;

pub use channel::{PusherChannel, RoomChannel};
pub use error::{DomainError, MessagePushError, RepositoryError};
pub use repository::RoomRepository;
pub use room::{
    ChatMessage, DebateType, KickedUser, MessageKind, Participant, ParticipantRole, Room,
    RoomFormat, RoomStatus, Team, TeamSide,
};
pub use session::{ConnectionId, Session};
pub use value::{MessageContent, RoomId, RoomIdFactory, Timestamp, UserId, Username};
