// src/routes/matches.rs
use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::handlers::matches::match_handler;
use crate::models::matches::{MatchCreateRequest, MatchUpdateRequest};

/// Create a new match
#[post("/api/matches")]
async fn create_match(
    request: web::Json<MatchCreateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    match_handler::create_new_match(request, pool).await
}

/// Get a match with both rosters
#[get("/api/matches/{id}")]
async fn get_match(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let match_id = path.into_inner();
    match_handler::get_match_detail(match_id, pool).await
}

/// Players of both sides of a match
#[get("/api/matches/{id}/players")]
async fn get_match_players(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let match_id = path.into_inner();
    match_handler::get_match_players(match_id, pool).await
}

/// Append rounds and optionally finalize a match
#[put("/api/matches/{id}")]
async fn update_match(
    path: web::Path<Uuid>,
    request: web::Json<MatchUpdateRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, TrackerError> {
    let match_id = path.into_inner();
    match_handler::update_match(match_id, request, pool).await
}
