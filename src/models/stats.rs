// src/models/stats.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Everything the aggregator needs to know about one stored match:
/// both sides with display names, the declared winner and starter,
/// and how many rounds were played.
#[derive(Debug, FromRow, Clone)]
pub struct MatchOutcomeRow {
    pub id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub starter_player_id: Option<Uuid>,
    pub winner_team_id: Option<Uuid>,
    pub team_a_name: String,
    pub team_b_name: String,
    pub round_count: i64,
}

/// Aggregate win/loss outcome for one team or player.
///
/// `win_rate` is a 2-decimal percentage string, `"0"` when no matches
/// have been played; the min-round fields are None until at least one
/// match fell on that side of the ledger.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStats {
    pub total_matches: i64,
    pub wins: i64,
    pub losses: i64,
    pub win_rate: String,
    pub most_played_against: Option<String>,
    pub min_win_rounds: Option<i64>,
    pub min_lose_rounds: Option<i64>,
}

/// One ranked entry inside a general-statistics block
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatEntry {
    pub id: Uuid,
    pub name: String,
    pub value: StatValue,
}

/// Block values are either plain counts or 2-decimal percentages and
/// averages; the untagged representation keeps counts as JSON integers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Score(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Count(v) => *v as f64,
            StatValue::Score(v) => *v,
        }
    }
}

/// One of the nine general-statistics rankings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatBlock {
    pub key: String,
    pub title: String,
    pub unit: String,
    #[serde(rename = "highlightLabel")]
    pub highlight_label: String,
    pub list: Vec<StatEntry>,
}

/// The entity kind a general-statistics query ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
    Teams,
    Players,
}

impl StatsKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "teams" => Some(StatsKind::Teams),
            "players" => Some(StatsKind::Players),
            _ => None,
        }
    }

    /// Arabic noun used inside block titles
    pub fn noun(&self) -> &'static str {
        match self {
            StatsKind::Teams => "فريق",
            StatsKind::Players => "لاعب",
        }
    }
}
