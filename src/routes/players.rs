// src/routes/players.rs
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::handlers::registry::player_handler;
use crate::handlers::registry::player_handler::PlayerListQuery;
use crate::models::player::PlayerRegistrationRequest;

/// List players, optionally filtered by team
#[get("/api/players")]
async fn get_players(
    query: web::Query<PlayerListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    player_handler::get_players(query, pool).await
}

/// Register a new player
#[post("/api/players")]
async fn register_player(
    request: web::Json<PlayerRegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    player_handler::register_new_player(request, pool).await
}

/// Every player with their teams
#[get("/api/players-with-teams")]
async fn get_players_with_teams(pool: web::Data<PgPool>) -> Result<HttpResponse, TrackerError> {
    player_handler::get_players_with_teams(pool).await
}

/// Get a single player
#[get("/api/player/{id}")]
async fn get_player_by_id(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let player_id = path.into_inner();
    player_handler::get_player(player_id, pool).await
}
