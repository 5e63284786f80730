use std::collections::{HashMap, HashSet};

use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries::MatchQueries;
use crate::db::player_queries::PlayerQueries;
use crate::db::team_queries::TeamQueries;
use crate::errors::TrackerError;
use crate::models::matches::MatchResult;
use crate::models::round::Round;
use crate::models::team::TeamWithPlayers;

// Display fallbacks preserved from the existing UI text
const UNKNOWN_STARTER: &str = "غير محدد";
const UNDECIDED_WINNER: &str = "لم يُحدد";

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Dates on which matches were played, newest first
pub async fn get_all_result_dates(pool: web::Data<PgPool>) -> Result<HttpResponse, TrackerError> {
    let matches = MatchQueries::new(pool.get_ref().clone());

    let dates: Vec<String> = matches
        .list_dates_desc()
        .await?
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    Ok(HttpResponse::Ok().json(dates))
}

/// All matches of one UTC day, with rosters, rounds and display names
#[tracing::instrument(name = "Results by day", skip(pool))]
pub async fn get_results_by_day(
    query: web::Query<ResultsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let (Some(year), Some(month), Some(day)) = (query.year, query.month, query.day) else {
        return Err(TrackerError::InvalidInput("Missing date params".into()));
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TrackerError::InvalidInput("Invalid match date".into()))?;
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end = start + Duration::days(1);

    let matches = MatchQueries::new(pool.get_ref().clone());
    let teams = TeamQueries::new(pool.get_ref().clone());
    let players = PlayerQueries::new(pool.get_ref().clone());

    let day_matches = matches.list_by_date_range(start, end).await?;
    if day_matches.is_empty() {
        return Ok(HttpResponse::Ok().json(Vec::<MatchResult>::new()));
    }

    let match_ids: Vec<Uuid> = day_matches.iter().map(|m| m.id).collect();
    let mut rounds_by_match: HashMap<Uuid, Vec<Round>> = HashMap::new();
    for round in matches.list_rounds_for_matches(&match_ids).await? {
        rounds_by_match.entry(round.match_id).or_default().push(round);
    }

    let team_ids: Vec<Uuid> = day_matches
        .iter()
        .flat_map(|m| [m.team_a_id, m.team_b_id])
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let team_names = teams.names_by_id(&team_ids).await?;
    let rosters = players.rosters_by_team(&team_ids).await?;

    let starter_ids: Vec<Uuid> = day_matches
        .iter()
        .filter_map(|m| m.starter_player_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let starter_names = players.names_by_id(&starter_ids).await?;

    let side = |team_id: Uuid| TeamWithPlayers {
        id: team_id,
        name: team_names.get(&team_id).cloned().unwrap_or_default(),
        players: rosters.get(&team_id).cloned().unwrap_or_default(),
    };

    let results: Vec<MatchResult> = day_matches
        .into_iter()
        .map(|m| {
            let starter_name = m
                .starter_player_id
                .and_then(|id| starter_names.get(&id).cloned())
                .unwrap_or_else(|| UNKNOWN_STARTER.to_string());
            let winner_name = m
                .winner_team_id
                .and_then(|id| team_names.get(&id).cloned())
                .unwrap_or_else(|| UNDECIDED_WINNER.to_string());

            MatchResult {
                team_a: side(m.team_a_id),
                team_b: side(m.team_b_id),
                rounds: rounds_by_match.remove(&m.id).unwrap_or_default(),
                starter_name,
                winner_name,
                match_info: m,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(results))
}
