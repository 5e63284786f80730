use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

pub async fn backend_health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Server is running" }))
}

/// Probe store connectivity with a trivial query
pub async fn database_health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.get_ref())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(json!({ "ok": true, "db": "connected" })),
        Err(e) => {
            tracing::error!("Database connectivity check failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
