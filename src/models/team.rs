// src/models/team.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::player::Player;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

/// Slim team reference embedded in player payloads
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamRef {
    pub id: Uuid,
    pub name: String,
}

/// Team with its full two-player roster
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamWithPlayers {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<Player>,
}

/// Request to create a new team from an existing player pair
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamCreateRequest {
    pub name: String,
    #[serde(rename = "playerIds")]
    pub player_ids: Vec<Uuid>,
}

impl TeamCreateRequest {
    /// Validate team creation request
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        if name.len() > 100 {
            return Err("Team name cannot exceed 100 characters".to_string());
        }

        if !name.chars().any(|c| c.is_alphanumeric()) {
            return Err("Team name must contain at least one letter or number".to_string());
        }

        // A team is a fixed pairing of exactly two distinct players
        if self.player_ids.len() != 2 {
            return Err("A team requires exactly 2 players".to_string());
        }

        if self.player_ids[0] == self.player_ids[1] {
            return Err("Team players must be distinct".to_string());
        }

        Ok(())
    }

    /// Get sanitized team name
    pub fn get_sanitized_name(&self) -> String {
        self.name
            .trim()
            .chars()
            .filter(|&c| c != '\0' && c != '\t' && c != '\r' && c != '\n')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
