// src/models/round.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One numbered scoring event within a match. Positive scores favor
/// team A, negative favor team B, zero is neutral/continuing.
/// Rounds are immutable once stored.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Round {
    pub id: Uuid,
    pub match_id: Uuid,
    pub round_number: i32,
    pub game_type: String,
    pub round_score: i32,
    pub round_details: Option<String>,
}

/// One round as submitted by the scoring UI, before a round number
/// has been assigned.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoundInput {
    pub game_type: String,
    pub round_score: i32,
    #[serde(default)]
    pub round_details: Option<String>,
}
