//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pipeline Inspector Server",
        version = "0.1.0",
        description = "Record keeping and reporting for pipeline support inspections"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Pipeline endpoints
        api::pipelines::list_pipelines,
        api::pipelines::create_pipeline,
        api::pipelines::get_pipeline,
        api::pipelines::update_pipeline,
        api::pipelines::delete_pipeline,
        api::pipelines::get_pipeline_report,
        api::pipelines::list_pipeline_supports,
        api::pipelines::create_support,
        api::pipelines::pipeline_action,
        // Support endpoints
        api::supports::get_support,
        api::supports::update_support,
        api::supports::delete_support,
        api::supports::list_support_inspections,
        api::supports::create_inspection,
        api::supports::support_action,
        // Inspection endpoints
        api::inspections::get_inspection,
        api::inspections::update_inspection,
        api::inspections::delete_inspection,
        // Dashboard endpoints
        api::dashboard::get_dashboard,
        api::dashboard::dashboard_action,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Pipelines
            models::PipelineStatus,
            models::Insulation,
            models::PipelineAttributes,
            models::PipelineAttributesPatch,
            models::CreatePipelineRequest,
            models::UpdatePipelineRequest,
            models::PipelineResponse,
            models::PipelineSummary,
            api::pipelines::PipelineListResponse,
            api::pipelines::SupportListResponse,
            api::pipelines::DeletePipelineResponse,
            // Supports
            models::CupType,
            models::CreateSupportRequest,
            models::UpdateSupportRequest,
            models::SupportSummary,
            models::SupportResponse,
            api::supports::InspectionListResponse,
            api::supports::DeleteSupportResponse,
            // Inspections
            models::Condition,
            models::InspectionStatus,
            models::QuestionAnswer,
            models::CreateInspectionRequest,
            models::UpdateInspectionRequest,
            models::InspectionResponse,
            // Reports
            models::ReportFields,
            models::ReportLine,
            models::PipelineReport,
            // Dashboard
            models::TimeFilter,
            models::DashboardMetrics,
            models::DashboardResponse,
            // Actions
            models::TargetEntity,
            models::NavigationMode,
            models::Presentation,
            models::ViewVariant,
            models::Navigation,
            models::ActionOutcome,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Pipelines", description = "Pipeline records and reports"),
        (name = "Supports", description = "Pipeline supports"),
        (name = "Inspections", description = "Support inspections"),
        (name = "Dashboard", description = "Dashboard statistics"),
        (name = "Actions", description = "Record actions returning navigation outcomes")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
