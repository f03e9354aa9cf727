//! UI 層（HTTP / WebSocket の境界）

mod auth;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use auth::{Auth, AuthenticatedUser, Claims, JwtManager, extract_bearer_token};
pub use error::{ApiError, ErrorResponse};
pub use server::{Server, build_router};
