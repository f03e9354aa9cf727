//! Bearer token authentication.
//!
//! Tokens are issued by the external auth service; this server only
//! validates them (signature + expiry) and extracts {userId, username}.
//! The `issue` method exists for tests and local development.

use axum::http::header::AUTHORIZATION;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{UserId, Username};

use super::error::ApiError;
use super::state::AppState;

/// JWT claims carried by the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name of the user
    pub username: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

/// Token validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("failed to issue token")]
    IssueFailed,
}

/// JWT token manager.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
}

impl JwtManager {
    /// Creates a new JWT manager from a shared secret.
    pub fn new(secret: &str, expiration_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs,
        }
    }

    /// Issues a token for {userId, username}.
    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        let now = rondan_shared::time::get_jst_timestamp() / 1000;
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: now + self.expiration_secs,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| AuthError::IssueFailed)
    }

    /// Validates a token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}

/// Authenticated user information extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Username,
}

/// Extractor for authenticated requests.
#[derive(Debug, Clone)]
pub struct Auth(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<Arc<AppState>> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

        let claims = state
            .jwt_manager
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user_id = UserId::new(claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;
        let username = Username::new(claims.username)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        Ok(Auth(AuthenticatedUser { user_id, username }))
    }
}
