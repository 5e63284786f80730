use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::handlers::backend_health_handler::{backend_health_check, database_health_check};

#[get("/")]
async fn backend_health() -> impl Responder {
    backend_health_check().await
}

#[get("/test-db")]
async fn test_db(pool: web::Data<PgPool>) -> HttpResponse {
    database_health_check(pool).await
}
