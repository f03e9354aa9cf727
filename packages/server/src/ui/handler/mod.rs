//! HTTP / WebSocket のハンドラ

pub mod http;
pub mod websocket;
