// src/routes/teams.rs
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::handlers::registry::team_handler;
use crate::models::team::TeamCreateRequest;

/// List all teams
#[get("/api/teams")]
async fn get_teams(pool: web::Data<PgPool>) -> Result<HttpResponse, TrackerError> {
    team_handler::get_teams(pool).await
}

/// Create a new team from a player pair
#[post("/api/teams")]
async fn create_team(
    request: web::Json<TeamCreateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    team_handler::create_new_team(request, pool).await
}

/// Get a single team
#[get("/api/team/{id}")]
async fn get_team_by_id(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let team_id = path.into_inner();
    team_handler::get_team(team_id, pool).await
}
