//! Pipeline API handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::ActingUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ActionOutcome, ActionQuery, CreatePipelineRequest, CreateSupportRequest, PipelineReport,
    PipelineResponse, SupportResponse, UpdatePipelineRequest,
};
use crate::services::{self, actions};

/// Response for pipeline listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PipelineListResponse {
    pub pipelines: Vec<PipelineResponse>,
    pub total: usize,
}

/// Response for the supports of a pipeline.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupportListResponse {
    pub supports: Vec<SupportResponse>,
}

/// Response after deleting a pipeline.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletePipelineResponse {
    pub id: i32,
    pub supports_deleted: u64,
    pub inspections_deleted: u64,
}

/// List all pipelines, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/pipelines",
    tag = "Pipelines",
    responses(
        (status = 200, description = "Pipelines with derived counts", body = PipelineListResponse),
    )
)]
pub async fn list_pipelines(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let rows = pool.list_pipelines_since(None).await?;
    let pipelines = services::describe_pipelines(&pool, &rows).await?;

    Ok(HttpResponse::Ok().json(PipelineListResponse {
        total: pipelines.len(),
        pipelines,
    }))
}

/// Create a pipeline. The engineer defaults to the acting user.
#[utoipa::path(
    post,
    path = "/api/v1/pipelines",
    tag = "Pipelines",
    request_body = CreatePipelineRequest,
    params(
        ("X-User" = Option<String>, Header, description = "Acting user reference")
    ),
    responses(
        (status = 201, description = "Pipeline created", body = PipelineResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_pipeline(
    user: ActingUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreatePipelineRequest>,
) -> AppResult<HttpResponse> {
    let model = pool
        .insert_pipeline(body.into_inner(), user.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(PipelineResponse::build(&model, 0, 0)))
}

#[utoipa::path(
    get,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 200, description = "Pipeline details", body = PipelineResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_pipeline(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let model = pool.require_pipeline(path.into_inner()).await?;
    let response = services::describe_pipeline(&pool, &model).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Update a pipeline. Fields absent from the body are kept.
#[utoipa::path(
    put,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    request_body = UpdatePipelineRequest,
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 200, description = "Pipeline updated", body = PipelineResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_pipeline(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdatePipelineRequest>,
) -> AppResult<HttpResponse> {
    let model = pool
        .update_pipeline(path.into_inner(), body.into_inner())
        .await?;
    let response = services::describe_pipeline(&pool, &model).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Delete a pipeline together with its supports and inspections.
#[utoipa::path(
    delete,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 200, description = "Pipeline deleted", body = DeletePipelineResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_pipeline(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let summary = pool.delete_pipeline(id).await?;

    Ok(HttpResponse::Ok().json(DeletePipelineResponse {
        id,
        supports_deleted: summary.supports,
        inspections_deleted: summary.inspections,
    }))
}

/// Report data for a pipeline: metadata plus one line per support.
#[utoipa::path(
    get,
    path = "/api/v1/pipelines/{pipeline_id}/report",
    tag = "Pipelines",
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 200, description = "Report data", body = PipelineReport),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_pipeline_report(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let report = services::build_pipeline_report(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/pipelines/{pipeline_id}/supports",
    tag = "Supports",
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 200, description = "Supports in creation order", body = SupportListResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_pipeline_supports(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let pipeline_id = path.into_inner();
    pool.require_pipeline(pipeline_id).await?;

    let rows = pool.get_supports_by_pipeline_id(pipeline_id).await?;
    let supports = services::describe_supports(&pool, &rows).await?;

    Ok(HttpResponse::Ok().json(SupportListResponse { supports }))
}

/// Add a support to a pipeline.
#[utoipa::path(
    post,
    path = "/api/v1/pipelines/{pipeline_id}/supports",
    tag = "Supports",
    request_body = CreateSupportRequest,
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID")
    ),
    responses(
        (status = 201, description = "Support created", body = SupportResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_support(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CreateSupportRequest>,
) -> AppResult<HttpResponse> {
    let model = pool
        .insert_support(path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(SupportResponse::build(&model, 0, None)))
}

/// Dispatch a pipeline action.
///
/// Actions: `set_in_progress`, `set_done`, `reset_draft`, `add_support`,
/// `delete`, `print_report`, `open_form`, `edit_support`.
#[utoipa::path(
    post,
    path = "/api/v1/pipelines/{pipeline_id}/actions/{action}",
    tag = "Actions",
    params(
        ("pipeline_id" = i32, Path, description = "Pipeline ID"),
        ("action" = String, Path, description = "Action name"),
        ActionQuery
    ),
    responses(
        (status = 200, description = "Action outcome", body = ActionOutcome),
        (status = 400, description = "Unknown action", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn pipeline_action(
    pool: web::Data<DbPool>,
    path: web::Path<(i32, String)>,
    query: web::Query<ActionQuery>,
) -> AppResult<HttpResponse> {
    let (pipeline_id, name) = path.into_inner();
    let action = actions::parse_pipeline_action(&name)?;

    let outcome = services::run_pipeline_action(&pool, pipeline_id, action, query.active_id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure pipeline routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/pipelines")
            .route(web::get().to(list_pipelines))
            .route(web::post().to(create_pipeline)),
    )
    .service(
        web::resource("/pipelines/{pipeline_id}")
            .route(web::get().to(get_pipeline))
            .route(web::put().to(update_pipeline))
            .route(web::delete().to(delete_pipeline)),
    )
    .service(web::resource("/pipelines/{pipeline_id}/report").route(web::get().to(get_pipeline_report)))
    .service(
        web::resource("/pipelines/{pipeline_id}/supports")
            .route(web::get().to(list_pipeline_supports))
            .route(web::post().to(create_support)),
    )
    .service(
        web::resource("/pipelines/{pipeline_id}/actions/{action}")
            .route(web::post().to(pipeline_action)),
    );
}
