//! Support API handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::ActingUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ActionOutcome, CreateInspectionRequest, InspectionResponse, SupportResponse,
    UpdateSupportRequest,
};
use crate::services::{self, actions};

/// Response for the inspections of a support.
#[derive(Debug, Serialize, ToSchema)]
pub struct InspectionListResponse {
    /// Newest first.
    pub inspections: Vec<InspectionResponse>,
}

/// Response after deleting a support.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSupportResponse {
    pub id: i32,
    pub inspections_deleted: u64,
}

/// Get a support with its derived fields.
#[utoipa::path(
    get,
    path = "/api/v1/supports/{support_id}",
    tag = "Supports",
    params(
        ("support_id" = i32, Path, description = "Support ID")
    ),
    responses(
        (status = 200, description = "Support details", body = SupportResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_support(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let model = pool.require_support(path.into_inner()).await?;
    let response = services::describe_support(&pool, &model).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/supports/{support_id}",
    tag = "Supports",
    request_body = UpdateSupportRequest,
    params(
        ("support_id" = i32, Path, description = "Support ID")
    ),
    responses(
        (status = 200, description = "Support updated", body = SupportResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_support(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdateSupportRequest>,
) -> AppResult<HttpResponse> {
    let model = pool
        .update_support(path.into_inner(), body.into_inner())
        .await?;
    let response = services::describe_support(&pool, &model).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Delete a support and its inspections.
#[utoipa::path(
    delete,
    path = "/api/v1/supports/{support_id}",
    tag = "Supports",
    params(
        ("support_id" = i32, Path, description = "Support ID")
    ),
    responses(
        (status = 200, description = "Support deleted", body = DeleteSupportResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_support(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let inspections_deleted = pool.delete_support(id).await?;

    Ok(HttpResponse::Ok().json(DeleteSupportResponse {
        id,
        inspections_deleted,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/supports/{support_id}/inspections",
    tag = "Inspections",
    params(
        ("support_id" = i32, Path, description = "Support ID")
    ),
    responses(
        (status = 200, description = "Inspections of the support", body = InspectionListResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_support_inspections(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let support_id = path.into_inner();
    pool.require_support(support_id).await?;

    let inspections = pool
        .get_inspections_by_support_id(support_id)
        .await?
        .into_iter()
        .map(InspectionResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(InspectionListResponse { inspections }))
}

/// Record an inspection. Q1 to Q4 must all carry a condition.
#[utoipa::path(
    post,
    path = "/api/v1/supports/{support_id}/inspections",
    tag = "Inspections",
    request_body = CreateInspectionRequest,
    params(
        ("support_id" = i32, Path, description = "Support ID"),
        ("X-User" = Option<String>, Header, description = "Acting user reference")
    ),
    responses(
        (status = 201, description = "Inspection created", body = InspectionResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Mandatory questions unanswered", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_inspection(
    user: ActingUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreateInspectionRequest>,
) -> AppResult<HttpResponse> {
    let inspection = pool
        .insert_inspection(path.into_inner(), body.into_inner(), user.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(InspectionResponse::from(inspection)))
}

/// Dispatch a support action.
///
/// Actions: `edit_last_inspection`, `view_inspection`, `save_and_open`,
/// `add_inspection`.
#[utoipa::path(
    post,
    path = "/api/v1/supports/{support_id}/actions/{action}",
    tag = "Actions",
    params(
        ("support_id" = i32, Path, description = "Support ID"),
        ("action" = String, Path, description = "Action name")
    ),
    responses(
        (status = 200, description = "Action outcome", body = ActionOutcome),
        (status = 400, description = "Unknown action", body = crate::error::ErrorResponse),
        (status = 404, description = "Support not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn support_action(
    pool: web::Data<DbPool>,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (support_id, name) = path.into_inner();
    let action = actions::parse_support_action(&name)?;

    let outcome = services::run_support_action(&pool, support_id, action).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure support routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/supports/{support_id}")
            .route(web::get().to(get_support))
            .route(web::put().to(update_support))
            .route(web::delete().to(delete_support)),
    )
    .service(
        web::resource("/supports/{support_id}/inspections")
            .route(web::get().to(list_support_inspections))
            .route(web::post().to(create_inspection)),
    )
    .service(
        web::resource("/supports/{support_id}/actions/{action}")
            .route(web::post().to(support_action)),
    );
}
