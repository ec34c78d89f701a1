//! API endpoint modules.

pub mod dashboard;
pub mod health;
pub mod inspections;
pub mod openapi;
pub mod pipelines;
pub mod supports;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::error::AppError;

pub use dashboard::configure_routes as configure_dashboard_routes;
pub use health::configure_health_routes;
pub use inspections::configure_routes as configure_inspection_routes;
pub use openapi::ApiDoc;
pub use pipelines::configure_routes as configure_pipeline_routes;
pub use supports::configure_routes as configure_support_routes;

/// JSON body settings: malformed bodies are reported as `INVALID_INPUT`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::InvalidInput(err.to_string()).into()
    })
}

/// Unparsable path segments (e.g. a non-numeric id) are `INVALID_INPUT`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        AppError::InvalidInput(err.to_string()).into()
    })
}

/// Unparsable query strings are `INVALID_INPUT`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::InvalidInput(err.to_string()).into()
    })
}

/// Register every `/api/v1` route on the given scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .configure(configure_health_routes)
        .configure(configure_pipeline_routes)
        .configure(configure_support_routes)
        .configure(configure_inspection_routes)
        .configure(configure_dashboard_routes)
        .service(openapi::openapi_json);
}
