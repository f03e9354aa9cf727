//! Real-time debate room server library.
//!
//! This library provides the room session & messaging subsystem of the
//! Rondan debate platform: membership management, chat relay with a
//! persisted transcript, and room lifecycle control over REST + WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
