//! 値オブジェクト定義
//!
//! ルーム ID・ユーザー ID などの識別子と、バリデーション付きの
//! メッセージ内容・タイムスタンプを値オブジェクトとして定義します。

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// メッセージ内容の最大文字数
const MAX_MESSAGE_CONTENT_LEN: usize = 2000;

/// 識別子の最大文字数
const MAX_ID_LEN: usize = 64;

/// ルーム ID（作成時に割り当てられ、以後不変）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::Blank("room id"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(DomainError::TooLong("room id", MAX_ID_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ルーム ID のファクトリ（UUID v4 を生成）
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> Result<RoomId, DomainError> {
        RoomId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// ユーザー ID（外部の認証コラボレータが発行する）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::Blank("user id"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(DomainError::TooLong("user id", MAX_ID_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ユーザー名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::Blank("username"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(DomainError::TooLong("username", MAX_ID_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// チャットメッセージの内容（空白のみは不可）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::Blank("message content"));
        }
        if value.chars().count() > MAX_MESSAGE_CONTENT_LEN {
            return Err(DomainError::TooLong("message content", MAX_MESSAGE_CONTENT_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
