//! Inspection API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{InspectionResponse, UpdateInspectionRequest};

#[utoipa::path(
    get,
    path = "/api/v1/inspections/{inspection_id}",
    tag = "Inspections",
    params(
        ("inspection_id" = i32, Path, description = "Inspection ID")
    ),
    responses(
        (status = 200, description = "Inspection with its nine answers", body = InspectionResponse),
        (status = 404, description = "Inspection not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_inspection(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let inspection = pool.require_inspection(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(InspectionResponse::from(inspection)))
}

/// Update an inspection. The result must still answer Q1 to Q4.
#[utoipa::path(
    put,
    path = "/api/v1/inspections/{inspection_id}",
    tag = "Inspections",
    request_body = UpdateInspectionRequest,
    params(
        ("inspection_id" = i32, Path, description = "Inspection ID")
    ),
    responses(
        (status = 200, description = "Inspection updated", body = InspectionResponse),
        (status = 404, description = "Inspection not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Mandatory questions unanswered", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_inspection(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdateInspectionRequest>,
) -> AppResult<HttpResponse> {
    let inspection = pool
        .update_inspection(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(InspectionResponse::from(inspection)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inspections/{inspection_id}",
    tag = "Inspections",
    params(
        ("inspection_id" = i32, Path, description = "Inspection ID")
    ),
    responses(
        (status = 204, description = "Inspection deleted"),
        (status = 404, description = "Inspection not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_inspection(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    pool.delete_inspection(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure inspection routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/inspections/{inspection_id}")
            .route(web::get().to(get_inspection))
            .route(web::put().to(update_inspection))
            .route(web::delete().to(delete_inspection)),
    );
}
