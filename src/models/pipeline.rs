//! Pipeline domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::inspection::decode_images;
use super::nullable;
use crate::entity::pipeline;

/// Pipeline status.
///
/// `draft` is accepted as an alias of `pending` on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    #[serde(alias = "draft")]
    Pending,
    InProgress,
    Done,
    #[serde(alias = "cancel")]
    Cancelled,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" | "draft" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" | "cancel" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Pipelines still being worked on count as active inspections on the dashboard.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Insulation {
    Yes,
    No,
}

impl Insulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

/// Descriptive and design attributes of a pipeline, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PipelineAttributes {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub system_name: Option<String>,
    #[serde(default)]
    pub drawing_iso_number: Option<String>,
    /// Design pressure lower bound (bar).
    #[serde(default)]
    pub design_pressure_bar_min: Option<f64>,
    /// Design pressure upper bound (bar).
    #[serde(default)]
    pub design_pressure_bar_max: Option<f64>,
    /// Design temperature lower bound (°C).
    #[serde(default)]
    pub design_temp_c_min: Option<f64>,
    /// Design temperature upper bound (°C).
    #[serde(default)]
    pub design_temp_c_max: Option<f64>,
    #[serde(default)]
    pub content_material: Option<String>,
    #[serde(default)]
    pub material_grade: Option<String>,
    #[serde(default)]
    pub material_lining: Option<String>,
    /// Nominal diameter (in).
    #[serde(default)]
    pub diameter: Option<String>,
    #[serde(default)]
    pub pipe_schedule: Option<String>,
    /// Wall thickness (mm).
    #[serde(default)]
    pub pipe_thickness: Option<f64>,
    #[serde(default)]
    pub insulation: Option<Insulation>,
    #[serde(default)]
    pub design_code: Option<String>,
    /// Corrosion allowance (mm).
    #[serde(default)]
    pub corr_allowance: Option<f64>,
    #[serde(default)]
    pub operation_pressure: Option<f64>,
    #[serde(default)]
    pub operation_temp: Option<f64>,
    #[serde(default)]
    pub painting: Option<String>,
}

impl PipelineAttributes {
    pub fn from_entity(model: &pipeline::Model) -> Self {
        PipelineAttributes {
            location: model.location.clone(),
            area: model.area.clone(),
            system_name: model.system_name.clone(),
            drawing_iso_number: model.drawing_iso_number.clone(),
            design_pressure_bar_min: model.design_pressure_bar_min,
            design_pressure_bar_max: model.design_pressure_bar_max,
            design_temp_c_min: model.design_temp_c_min,
            design_temp_c_max: model.design_temp_c_max,
            content_material: model.content_material.clone(),
            material_grade: model.material_grade.clone(),
            material_lining: model.material_lining.clone(),
            diameter: model.diameter.clone(),
            pipe_schedule: model.pipe_schedule.clone(),
            pipe_thickness: model.pipe_thickness,
            insulation: model.insulation.as_deref().and_then(Insulation::parse),
            design_code: model.design_code.clone(),
            corr_allowance: model.corr_allowance,
            operation_pressure: model.operation_pressure,
            operation_temp: model.operation_temp,
            painting: model.painting.clone(),
        }
    }
}

/// Request body for creating a pipeline.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePipelineRequest {
    pub pipeline_name: String,
    /// Defaults to the acting user.
    #[serde(default)]
    pub engineer: Option<String>,
    #[serde(default)]
    pub status: Option<PipelineStatus>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub attributes: PipelineAttributes,
}

/// Attribute changes on update: absent keeps the stored value, `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct PipelineAttributesPatch {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub area: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub system_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub drawing_iso_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub design_pressure_bar_min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub design_pressure_bar_max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub design_temp_c_min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub design_temp_c_max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub content_material: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub material_grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub material_lining: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub diameter: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub pipe_schedule: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub pipe_thickness: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Insulation>)]
    pub insulation: Option<Option<Insulation>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub design_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub corr_allowance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub operation_pressure: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub operation_temp: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub painting: Option<Option<String>>,
}

/// Request body for updating a pipeline. Absent fields are kept, `null` clears optional ones.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePipelineRequest {
    #[serde(default)]
    pub pipeline_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub engineer: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<PipelineStatus>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(flatten)]
    pub attributes: PipelineAttributesPatch,
}

/// Pipeline with derived counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PipelineResponse {
    pub id: i32,
    pub pipeline_name: String,
    pub engineer: Option<String>,
    pub status: PipelineStatus,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub attributes: PipelineAttributes,
    pub supports_count: u64,
    pub inspections_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PipelineResponse {
    pub fn build(model: &pipeline::Model, supports_count: u64, inspections_count: u64) -> Self {
        PipelineResponse {
            id: model.id,
            pipeline_name: model.pipeline_name.clone(),
            engineer: model.engineer.clone(),
            status: PipelineStatus::parse(&model.status).unwrap_or_default(),
            images: decode_images(&model.images),
            attributes: PipelineAttributes::from_entity(model),
            supports_count,
            inspections_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Compact pipeline row for dashboard lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PipelineSummary {
    pub id: i32,
    pub pipeline_name: String,
    pub location: Option<String>,
    pub engineer: Option<String>,
    pub status: PipelineStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&pipeline::Model> for PipelineSummary {
    fn from(model: &pipeline::Model) -> Self {
        PipelineSummary {
            id: model.id,
            pipeline_name: model.pipeline_name.clone(),
            location: model.location.clone(),
            engineer: model.engineer.clone(),
            status: PipelineStatus::parse(&model.status).unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}
