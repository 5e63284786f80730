// src/routes/results.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::errors::TrackerError;
use crate::handlers::matches::results_handler;
use crate::handlers::matches::results_handler::ResultsQuery;

/// Dates with recorded matches, newest first
#[get("/api/results/all-dates")]
async fn get_all_dates(pool: web::Data<PgPool>) -> Result<HttpResponse, TrackerError> {
    results_handler::get_all_result_dates(pool).await
}

/// Full results of one day
#[get("/api/results")]
async fn get_results(
    query: web::Query<ResultsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    results_handler::get_results_by_day(query, pool).await
}
