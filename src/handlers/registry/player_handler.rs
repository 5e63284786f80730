use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::player_queries::PlayerQueries;
use crate::errors::TrackerError;
use crate::models::player::PlayerRegistrationRequest;

#[derive(Debug, Deserialize)]
pub struct PlayerListQuery {
    #[serde(rename = "teamId")]
    pub team_id: Option<Uuid>,
}

/// Register a new player with a unique, trimmed name
#[tracing::instrument(
    name = "Register player",
    skip(request, pool),
    fields(player_name = %request.name)
)]
pub async fn register_new_player(
    request: web::Json<PlayerRegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    if let Err(validation_error) = request.validate() {
        tracing::warn!("Player registration validation failed: {}", validation_error);
        return Err(TrackerError::InvalidInput(validation_error));
    }

    let name = request.get_sanitized_name();
    let players = PlayerQueries::new(pool.get_ref().clone());

    if players.find_by_name(&name).await?.is_some() {
        return Err(TrackerError::Conflict("Player already exists".into()));
    }

    let player = players.insert(&name).await?;
    tracing::info!("Registered player '{}' with ID: {}", player.name, player.id);

    Ok(HttpResponse::Ok().json(player))
}

/// List players, optionally restricted to one team's roster
pub async fn get_players(
    query: web::Query<PlayerListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let players = PlayerQueries::new(pool.get_ref().clone());

    let list = match query.team_id {
        Some(team_id) => players.list_by_team(team_id).await?,
        None => players.list().await?,
    };

    Ok(HttpResponse::Ok().json(list))
}

/// Get one player by id
pub async fn get_player(
    player_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let players = PlayerQueries::new(pool.get_ref().clone());

    match players.get(player_id).await? {
        Some(player) => Ok(HttpResponse::Ok().json(player)),
        None => Err(TrackerError::NotFound("Player not found".into())),
    }
}

/// Every player with the teams they belong to
pub async fn get_players_with_teams(
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let players = PlayerQueries::new(pool.get_ref().clone());
    Ok(HttpResponse::Ok().json(players.list_with_teams().await?))
}
