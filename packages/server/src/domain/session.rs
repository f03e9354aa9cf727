//! セッション（接続ごとの一時的な状態、永続化しない）

use serde::Serialize;
use uuid::Uuid;

use super::value::{RoomId, UserId, Username};

/// 接続 ID（接続ごとに生成される UUID v4）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// ライブ接続 1 本につき 1 つのセッション
///
/// 同一ユーザーが 2 本の接続を開いた場合、セッションは 2 つ独立に存在する。
/// 接続の認証成功時に作られ、切断時に破棄される。
#[derive(Debug, Clone)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub username: Username,
    /// 最後に join したルーム（切断時の暗黙 leave に使う）
    pub current_room: Option<RoomId>,
}

impl Session {
    pub fn new(connection_id: ConnectionId, user_id: UserId, username: Username) -> Self {
        Self {
            connection_id,
            user_id,
            username,
            current_room: None,
        }
    }
}
