//! Repository 実装

mod inmemory;

pub use inmemory::InMemoryRoomRepository;
