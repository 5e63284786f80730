use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::player_queries::PlayerQueries;
use crate::db::team_queries::TeamQueries;
use crate::errors::TrackerError;
use crate::models::team::TeamCreateRequest;

/// Create a team from a pair of existing players.
///
/// The same two players may not form a second team together.
#[tracing::instrument(
    name = "Create team",
    skip(request, pool),
    fields(team_name = %request.name)
)]
pub async fn create_new_team(
    request: web::Json<TeamCreateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    if let Err(validation_error) = request.validate() {
        tracing::warn!("Team creation validation failed: {}", validation_error);
        return Err(TrackerError::InvalidInput(validation_error));
    }

    let players = PlayerQueries::new(pool.get_ref().clone());
    let teams = TeamQueries::new(pool.get_ref().clone());

    if players.count_existing(&request.player_ids).await? != 2 {
        return Err(TrackerError::InvalidInput(
            "Both players must be registered first".into(),
        ));
    }

    if teams
        .pair_exists(request.player_ids[0], request.player_ids[1])
        .await?
    {
        return Err(TrackerError::Conflict(
            "These players already form a team".into(),
        ));
    }

    let team = teams
        .insert_with_players(&request.get_sanitized_name(), &request.player_ids)
        .await?;

    Ok(HttpResponse::Ok().json(team))
}

/// List all teams
pub async fn get_teams(pool: web::Data<PgPool>) -> Result<HttpResponse, TrackerError> {
    let teams = TeamQueries::new(pool.get_ref().clone());
    Ok(HttpResponse::Ok().json(teams.list().await?))
}

/// Get one team by id
pub async fn get_team(
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let teams = TeamQueries::new(pool.get_ref().clone());

    match teams.get(team_id).await? {
        Some(team) => Ok(HttpResponse::Ok().json(team)),
        None => Err(TrackerError::NotFound("Team not found".into())),
    }
}
