//! Realtime presence relay for a browser-based multiplayer plaza.
//!
//! Layers, from the inside out:
//!
//! - `domain`: value objects, entities, the `Plaza` aggregate and the
//!   repository / pusher interfaces
//! - `usecase`: one struct per group of client intents
//! - `infrastructure`: wire DTOs, the in-memory store, the WebSocket pusher
//! - `ui`: axum router and handlers

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
