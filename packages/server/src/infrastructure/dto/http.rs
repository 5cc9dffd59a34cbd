//! HTTP API response bodies.

use serde::{Deserialize, Serialize};

use super::websocket::{HouseDto, LeaderboardEntryDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummaryDto {
    pub id: String,
    pub name: String,
    pub world: String,
    pub score: u32,
}

/// Snapshot of the relay for operators and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlazaStateDto {
    pub online: usize,
    pub players: Vec<PlayerSummaryDto>,
    pub houses: Vec<HouseDto>,
    pub art_count: usize,
    pub chat_count: usize,
    pub checked_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardDto {
    pub entries: Vec<LeaderboardEntryDto>,
}
