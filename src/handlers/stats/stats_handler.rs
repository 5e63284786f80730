use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::models::stats::StatsKind;
use crate::stats::aggregator::StatsService;

#[derive(Debug, Deserialize)]
pub struct GeneralStatsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Win/loss aggregate for one team
pub async fn get_team_statistics(
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let service = StatsService::new(pool.get_ref().clone());
    Ok(HttpResponse::Ok().json(service.team_stats(team_id).await?))
}

/// Win/loss aggregate for one player across all their teams
pub async fn get_player_statistics(
    player_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let service = StatsService::new(pool.get_ref().clone());
    Ok(HttpResponse::Ok().json(service.player_stats(player_id).await?))
}

/// The nine league-wide ranking blocks
pub async fn get_general_statistics(
    query: web::Query<GeneralStatsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let kind = query
        .kind
        .as_deref()
        .and_then(StatsKind::parse)
        .ok_or_else(|| TrackerError::InvalidInput("نوع الإحصائيات غير صالح".into()))?;

    let service = StatsService::new(pool.get_ref().clone());
    Ok(HttpResponse::Ok().json(service.general_stats(kind).await?))
}
