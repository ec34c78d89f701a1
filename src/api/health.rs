//! Liveness and readiness endpoints.

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::ErrorResponse;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

/// Reported once the record store answers.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    /// Storage backend in use (`Postgres`, `Sqlite`).
    database: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Ready when the record store accepts queries.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Record store reachable", body = ReadyResponse),
        (status = 503, description = "Record store unreachable", body = ErrorResponse)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>) -> HttpResponse {
    match pool.connection().ping().await {
        Ok(()) => HttpResponse::Ok().json(ReadyResponse {
            status: "ready",
            database: format!("{:?}", pool.backend()),
        }),
        Err(e) => {
            error!(error = %e, "Record store unreachable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "NOT_READY".to_string(),
                message: "Record store unreachable".to_string(),
            })
        }
    }
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
