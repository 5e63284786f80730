// src/models/player.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::team::TeamRef;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
}

/// Request to register a new player
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerRegistrationRequest {
    pub name: String,
}

impl PlayerRegistrationRequest {
    /// Validate player registration request
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Player name is required".to_string());
        }

        if name.len() > 100 {
            return Err("Player name cannot exceed 100 characters".to_string());
        }

        if !name.chars().any(|c| c.is_alphanumeric()) {
            return Err("Player name must contain at least one letter or number".to_string());
        }

        Ok(())
    }

    /// Get sanitized player name
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

/// Player together with every team they belong to
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerWithTeams {
    pub id: Uuid,
    pub name: String,
    pub teams: Vec<TeamRef>,
}
