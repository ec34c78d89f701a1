//! Support domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::inspection::{Inspection, InspectionStatus};
use super::nullable;
use super::report::ReportFields;
use crate::entity::{inspection, support};

/// Area type assigned to new supports.
pub const DEFAULT_AREA_TYPE: &str = "N/A";

/// Display name used when a support has no code, level or pipe reference.
pub const UNNAMED_SUPPORT: &str = "New Support";

/// Support cup type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CupType {
    U,
    G,
    A,
    R,
    S,
    Sp,
    C,
    Ss,
    Vudlr,
    Vddlr,
    Vudlw,
    Vddlw,
    Hdlr,
    Hdlw,
    Fsd,
    Hsd,
    Fwsd,
    Fcr,
    Hcr,
}

impl CupType {
    pub const ALL: [CupType; 19] = [
        Self::U,
        Self::G,
        Self::A,
        Self::R,
        Self::S,
        Self::Sp,
        Self::C,
        Self::Ss,
        Self::Vudlr,
        Self::Vddlr,
        Self::Vudlw,
        Self::Vddlw,
        Self::Hdlr,
        Self::Hdlw,
        Self::Fsd,
        Self::Hsd,
        Self::Fwsd,
        Self::Fcr,
        Self::Hcr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U => "u",
            Self::G => "g",
            Self::A => "a",
            Self::R => "r",
            Self::S => "s",
            Self::Sp => "sp",
            Self::C => "c",
            Self::Ss => "ss",
            Self::Vudlr => "vudlr",
            Self::Vddlr => "vddlr",
            Self::Vudlw => "vudlw",
            Self::Vddlw => "vddlw",
            Self::Hdlr => "hdlr",
            Self::Hdlw => "hdlw",
            Self::Fsd => "fsd",
            Self::Hsd => "hsd",
            Self::Fwsd => "fwsd",
            Self::Fcr => "fcr",
            Self::Hcr => "hcr",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Uppercase code as printed on drawings.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Join the non-empty identifying parts of a support with " / ".
pub fn display_name(code: &str, level: Option<&str>, pipe_ref: Option<&str>) -> String {
    let parts: Vec<&str> = [Some(code), level, pipe_ref]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        UNNAMED_SUPPORT.to_string()
    } else {
        parts.join(" / ")
    }
}

/// The most recently created inspection (highest id).
pub fn last_inspection(inspections: &[inspection::Model]) -> Option<&inspection::Model> {
    inspections.iter().max_by_key(|i| i.id)
}

/// Request body for adding a support to a pipeline.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSupportRequest {
    pub support_code: String,
    #[serde(default)]
    pub support_level: Option<String>,
    #[serde(default)]
    pub pipe_ref: Option<String>,
    #[serde(default)]
    pub cup_type: Option<CupType>,
    /// Defaults to "N/A".
    #[serde(default)]
    pub area_type: Option<String>,
}

/// Request body for updating a support. Absent fields are kept, `null` clears optional ones.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSupportRequest {
    #[serde(default)]
    pub support_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub support_level: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub pipe_ref: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<CupType>)]
    pub cup_type: Option<Option<CupType>>,
    #[serde(default)]
    pub area_type: Option<String>,
}

/// Identifying fields of a support, as printed on reports.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupportSummary {
    pub id: i32,
    pub name: String,
    pub support_code: String,
    pub support_level: Option<String>,
    pub pipe_ref: Option<String>,
    pub cup_type: Option<CupType>,
    /// Printed form of `cup_type`.
    pub cup_type_label: Option<String>,
    pub area_type: String,
    /// Status of the last inspection, if any.
    pub state: Option<InspectionStatus>,
}

impl SupportSummary {
    pub fn build(model: &support::Model, last: Option<&Inspection>) -> Self {
        let cup_type = model.cup_type.as_deref().and_then(CupType::parse);
        SupportSummary {
            id: model.id,
            name: display_name(
                &model.support_code,
                model.support_level.as_deref(),
                model.pipe_ref.as_deref(),
            ),
            support_code: model.support_code.clone(),
            support_level: model.support_level.clone(),
            pipe_ref: model.pipe_ref.clone(),
            cup_type,
            cup_type_label: cup_type.map(|c| c.label()),
            area_type: model.area_type.clone(),
            state: last.map(|i| i.status),
        }
    }
}

/// Support with every derived field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupportResponse {
    pub pipeline_id: i32,
    #[serde(flatten)]
    pub summary: SupportSummary,
    pub inspections_count: u64,
    pub last_inspection_id: Option<i32>,
    #[serde(flatten)]
    pub report: ReportFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupportResponse {
    pub fn build(model: &support::Model, inspections_count: u64, last: Option<&Inspection>) -> Self {
        SupportResponse {
            pipeline_id: model.pipeline_id,
            summary: SupportSummary::build(model, last),
            inspections_count,
            last_inspection_id: last.map(|i| i.id),
            report: ReportFields::from_last_inspection(last),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
