use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries::MatchQueries;
use crate::db::player_queries::PlayerQueries;
use crate::db::team_queries::TeamQueries;
use crate::errors::TrackerError;
use crate::models::matches::{Match, MatchCreateRequest, MatchUpdateRequest, MatchWithTeams};
use crate::models::team::TeamWithPlayers;
use crate::scoring::progression::MatchProgressionService;

/// Create a new match between two teams
#[tracing::instrument(name = "Create match request", skip(request, pool))]
pub async fn create_new_match(
    request: web::Json<MatchCreateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let service = MatchProgressionService::new(pool.get_ref().clone());
    let created = service.create_match(&request).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// Get one match with both rosters resolved
pub async fn get_match_detail(
    match_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let matches = MatchQueries::new(pool.get_ref().clone());

    let match_row = matches
        .get(match_id)
        .await?
        .ok_or_else(|| TrackerError::NotFound("Match not found".into()))?;

    let (team_a, team_b) = load_sides(&match_row, &pool).await?;

    Ok(HttpResponse::Ok().json(MatchWithTeams {
        match_info: match_row,
        team_a,
        team_b,
    }))
}

/// Flattened list of the players on both sides of a match
pub async fn get_match_players(
    match_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let matches = MatchQueries::new(pool.get_ref().clone());

    let match_row = matches
        .get(match_id)
        .await?
        .ok_or_else(|| TrackerError::NotFound("Match not found".into()))?;

    let (team_a, team_b) = load_sides(&match_row, &pool).await?;

    let mut players = team_a.players;
    players.extend(team_b.players);

    Ok(HttpResponse::Ok().json(players))
}

/// Append rounds, update the starter and optionally finalize
#[tracing::instrument(name = "Update match request", skip(request, pool))]
pub async fn update_match(
    match_id: Uuid,
    request: web::Json<MatchUpdateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let service = MatchProgressionService::new(pool.get_ref().clone());
    service.append_rounds(match_id, &request).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Resolve both sides of a match into named, rostered teams
async fn load_sides(
    match_row: &Match,
    pool: &web::Data<PgPool>,
) -> Result<(TeamWithPlayers, TeamWithPlayers), TrackerError> {
    let teams = TeamQueries::new(pool.get_ref().clone());
    let players = PlayerQueries::new(pool.get_ref().clone());

    let team_ids = [match_row.team_a_id, match_row.team_b_id];
    let names = teams.names_by_id(&team_ids).await?;
    let mut rosters = players.rosters_by_team(&team_ids).await?;

    let mut side = |team_id: Uuid| -> Result<TeamWithPlayers, TrackerError> {
        Ok(TeamWithPlayers {
            id: team_id,
            name: names
                .get(&team_id)
                .cloned()
                .ok_or_else(|| TrackerError::NotFound("Team not found".into()))?,
            players: rosters.remove(&team_id).unwrap_or_default(),
        })
    };

    let team_a = side(match_row.team_a_id)?;
    let team_b = side(match_row.team_b_id)?;
    Ok((team_a, team_b))
}
