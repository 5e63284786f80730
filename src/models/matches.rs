// src/models/matches.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::round::{Round, RoundInput};
use crate::models::team::TeamWithPlayers;

/// One scored contest between two teams on a date. `winner_team_id` and
/// `final_score` stay unset/zero until the match is finalized.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    #[serde(rename = "teamA_id")]
    pub team_a_id: Uuid,
    #[serde(rename = "teamB_id")]
    pub team_b_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub starter_player_id: Option<Uuid>,
    pub winner_team_id: Option<Uuid>,
    pub final_score: i32,
    pub notes: String,
}

/// Request to create a new match between two teams
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchCreateRequest {
    #[serde(rename = "teamA_id")]
    pub team_a_id: Option<Uuid>,
    #[serde(rename = "teamB_id")]
    pub team_b_id: Option<Uuid>,
    pub match_date: Option<String>,
    #[serde(default)]
    pub starter_player_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MatchCreateRequest {
    /// Parse the submitted match date. Accepts RFC 3339 timestamps and
    /// plain `YYYY-MM-DD` dates (taken as UTC midnight).
    pub fn parsed_date(&self) -> Result<DateTime<Utc>, String> {
        let raw = match &self.match_date {
            Some(raw) if !raw.trim().is_empty() => raw.trim(),
            _ => return Err("Missing required fields".to_string()),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Ok(dt.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
        }

        Err("Invalid match date".to_string())
    }
}

/// Request to append rounds to a match and optionally finalize it
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchUpdateRequest {
    #[serde(default)]
    pub starter_player_id: Option<Uuid>,
    #[serde(default)]
    pub rounds: Option<Vec<RoundInput>>,
    #[serde(default)]
    pub finish: Option<bool>,
}

/// Match payload with both rosters resolved
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub match_info: Match,
    #[serde(rename = "teamA")]
    pub team_a: TeamWithPlayers,
    #[serde(rename = "teamB")]
    pub team_b: TeamWithPlayers,
}

/// Finished-or-in-progress match as listed on the results screen:
/// rosters, rounds and resolved starter/winner display names.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchResult {
    #[serde(flatten)]
    pub match_info: Match,
    #[serde(rename = "teamA")]
    pub team_a: TeamWithPlayers,
    #[serde(rename = "teamB")]
    pub team_b: TeamWithPlayers,
    pub rounds: Vec<Round>,
    #[serde(rename = "starterName")]
    pub starter_name: String,
    #[serde(rename = "winnerName")]
    pub winner_name: String,
}
