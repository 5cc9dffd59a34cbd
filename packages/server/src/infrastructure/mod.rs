//! Infrastructure layer: wire DTOs, the in-memory store and the WebSocket pusher.

pub mod dto;
pub mod message_pusher;
pub mod repository;
