//! Printable report data.
//!
//! The report renderer is external; these types are the data it consumes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::inspection::Inspection;
use super::pipeline::PipelineResponse;
use super::support::SupportSummary;

/// Caption printed under the general visual photo.
pub const VISUAL_CAPTION: &str = "General Visual";

/// Report columns taken from the general visual question (Q1) of the last inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportFields {
    pub question_tag: String,
    /// Long form of the Q1 condition, e.g. "A1 - Significant".
    pub visual_condition: String,
    pub visual_comment: String,
    pub visual_recommendation: String,
    /// First Q1 photo, if any.
    pub visual_image: Option<String>,
    pub visual_caption: String,
}

impl ReportFields {
    pub fn from_last_inspection(last: Option<&Inspection>) -> Self {
        let Some(inspection) = last else {
            return ReportFields::default();
        };

        let q1 = inspection.answers.first();
        ReportFields {
            question_tag: q1.condition.map(|c| c.tag()).unwrap_or_default(),
            visual_condition: q1.condition.map(|c| c.label().to_string()).unwrap_or_default(),
            visual_comment: q1.comment.clone().unwrap_or_default(),
            visual_recommendation: q1.recommendation.clone().unwrap_or_default(),
            visual_image: q1.images.first().cloned(),
            visual_caption: VISUAL_CAPTION.to_string(),
        }
    }
}

/// One support row of the pipeline report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportLine {
    pub support: SupportSummary,
    pub fields: ReportFields,
}

/// Everything the renderer needs to print a pipeline report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PipelineReport {
    pub pipeline: PipelineResponse,
    /// Supports in creation order.
    pub supports: Vec<ReportLine>,
    pub generated_at: DateTime<Utc>,
}
