//! Dashboard API handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ActionOutcome, DashboardResponse};
use crate::services::{self, actions};

/// Dashboard statistics for the persisted time filter.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard with computed metrics", body = DashboardResponse),
    )
)]
pub async fn get_dashboard(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let dashboard = services::load_dashboard(&pool, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Dispatch a dashboard action.
///
/// Actions: `set_filter_all`, `set_filter_month`, `set_filter_today`,
/// `create_new_pipeline`.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/actions/{action}",
    tag = "Actions",
    params(
        ("action" = String, Path, description = "Action name")
    ),
    responses(
        (status = 200, description = "Action outcome", body = ActionOutcome),
        (status = 400, description = "Unknown action", body = crate::error::ErrorResponse),
    )
)]
pub async fn dashboard_action(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let action = actions::parse_dashboard_action(&path.into_inner())?;
    let outcome = services::run_dashboard_action(&pool, action).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard").route(web::get().to(get_dashboard)))
        .service(
            web::resource("/dashboard/actions/{action}").route(web::post().to(dashboard_action)),
        );
}
