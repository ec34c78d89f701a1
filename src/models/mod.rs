//! Domain models for the pipeline inspector.

pub mod action;
pub mod dashboard;
pub mod inspection;
pub mod pipeline;
pub mod report;
pub mod support;

// Re-export commonly used types
pub use action::{
    ActionOutcome, DashboardAction, Navigation, NavigationMode, PipelineAction, Presentation,
    SupportAction, TargetEntity, ViewVariant,
};
pub use dashboard::{DashboardMetrics, DashboardResponse, TimeFilter};
pub use inspection::{
    Condition, CreateInspectionRequest, Inspection, InspectionResponse, InspectionStatus,
    QuestionAnswer, QuestionAnswers, UpdateInspectionRequest,
};
pub use pipeline::{
    CreatePipelineRequest, Insulation, PipelineAttributes, PipelineAttributesPatch,
    PipelineResponse, PipelineStatus, PipelineSummary, UpdatePipelineRequest,
};
pub use report::{PipelineReport, ReportFields, ReportLine};
pub use support::{CreateSupportRequest, CupType, SupportResponse, SupportSummary, UpdateSupportRequest};

/// Query parameters accepted by action endpoints.
#[derive(Debug, Clone, Default, serde::Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActionQuery {
    /// Record the action applies to inside the current view (e.g. a support row).
    pub active_id: Option<i32>,
}

/// Deserialize a field that distinguishes absent (`None`) from an explicit
/// `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

/// Trim a required text field, rejecting blank values.
pub fn required_text(value: &str, field: &str) -> crate::error::AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::error::AppError::InvalidInput(format!(
            "{} is required",
            field
        )));
    }
    Ok(trimmed.to_string())
}
