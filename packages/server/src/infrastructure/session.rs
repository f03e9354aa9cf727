//! Session Registry 実装
//!
//! ライブ接続と {userId, username, currentRoom} の対応を保持する
//! インメモリのレジストリ。接続の認証成功時にセッションを登録し、
//! 切断時に remove で取り出して暗黙 leave の処理に使う。
//!
//! 散在しがちな接続 → ルームのグローバルな対応表を、接続 ID をキーと
//! する単一のオブジェクトに集約し、切断時のクリーンアップを一箇所の
//! 呼び出しにする。

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomId, Session};

/// セッションレジストリ
pub struct SessionRegistry {
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl SessionRegistry {
    /// 空の SessionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// セッションを登録する
    pub async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.connection_id.clone(), session);
    }

    /// 接続 ID でセッションを取得する
    pub async fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(connection_id).cloned()
    }

    /// セッションの現在のルームを更新する
    pub async fn set_current_room(&self, connection_id: &ConnectionId, room_id: Option<RoomId>) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(connection_id) {
            session.current_room = room_id;
        }
    }

    /// セッションを削除して返す（切断時の teardown）
    pub async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(connection_id)
    }

    /// 登録中のセッション数を取得
    pub async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
