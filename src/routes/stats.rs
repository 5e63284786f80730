// src/routes/stats.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::handlers::stats::stats_handler;
use crate::handlers::stats::stats_handler::GeneralStatsQuery;

/// Aggregate statistics for one team
#[get("/api/stats/team/{team_id}")]
async fn get_team_stats(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let team_id = path.into_inner();
    stats_handler::get_team_statistics(team_id, pool).await
}

/// Aggregate statistics for one player
#[get("/api/stats/player/{player_id}")]
async fn get_player_stats(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let player_id = path.into_inner();
    stats_handler::get_player_statistics(player_id, pool).await
}

/// League-wide rankings for teams or players
#[get("/api/stats/general")]
async fn get_general_stats(
    query: web::Query<GeneralStatsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    stats_handler::get_general_statistics(query, pool).await
}
