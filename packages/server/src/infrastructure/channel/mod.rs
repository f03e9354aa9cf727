//! Room Channel 実装

mod websocket;

pub use websocket::WebSocketRoomChannel;
