//! Database queries for pipelines.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entity::pipeline::{self, ActiveModel, Entity as Pipeline};
use crate::entity::{inspection, support};
use crate::error::{AppError, AppResult};
use crate::models::inspection::encode_images;
use crate::models::{
    CreatePipelineRequest, PipelineAttributes, PipelineAttributesPatch, PipelineStatus,
    UpdatePipelineRequest, required_text,
};

use super::DbPool;
use super::inspections::delete_inspections_of_supports;

/// Rows removed together with a parent record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub supports: u64,
    pub inspections: u64,
}

/// Supports and inspections owned by one pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineCounts {
    pub supports: u64,
    pub inspections: u64,
}

macro_rules! attribute_columns {
    ($apply:ident) => {
        $apply!(
            location,
            area,
            system_name,
            drawing_iso_number,
            design_pressure_bar_min,
            design_pressure_bar_max,
            design_temp_c_min,
            design_temp_c_max,
            content_material,
            material_grade,
            material_lining,
            diameter,
            pipe_schedule,
            pipe_thickness,
            design_code,
            corr_allowance,
            operation_pressure,
            operation_temp,
            painting,
        )
    };
}

/// Copy every attribute onto a new active model.
fn apply_attributes(active: &mut ActiveModel, attrs: &PipelineAttributes) {
    macro_rules! assign {
        ($($field:ident),+ $(,)?) => {
            $( active.$field = Set(attrs.$field.clone()); )+
        };
    }
    attribute_columns!(assign);

    active.insulation = Set(attrs.insulation.map(|i| i.as_str().to_string()));
}

/// Write the attributes present in the patch. An explicit `null` clears the column.
fn apply_patch(active: &mut ActiveModel, patch: &PipelineAttributesPatch) {
    macro_rules! assign {
        ($($field:ident),+ $(,)?) => {
            $(
                if let Some(value) = &patch.$field {
                    active.$field = Set(value.clone());
                }
            )+
        };
    }
    attribute_columns!(assign);

    if let Some(insulation) = patch.insulation {
        active.insulation = Set(insulation.map(|i| i.as_str().to_string()));
    }
}

impl DbPool {
    /// Insert a new pipeline. The engineer defaults to the acting user.
    pub async fn insert_pipeline(
        &self,
        req: CreatePipelineRequest,
        acting_user: Option<String>,
    ) -> AppResult<pipeline::Model> {
        let name = required_text(&req.pipeline_name, "pipeline_name")?;
        let now = Utc::now();

        let mut model = ActiveModel {
            pipeline_name: Set(name),
            engineer: Set(req.engineer.or(acting_user)),
            status: Set(req.status.unwrap_or_default().as_str().to_string()),
            images: Set(encode_images(&req.images)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_attributes(&mut model, &req.attributes);

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert pipeline: {}", e)))?;

        info!(pipeline_id = result.id, name = %result.pipeline_name, "Pipeline created");
        Ok(result)
    }

    /// Get a pipeline by ID.
    pub async fn get_pipeline_by_id(&self, id: i32) -> AppResult<Option<pipeline::Model>> {
        let result = Pipeline::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get pipeline: {}", e)))?;

        Ok(result)
    }

    /// Get a pipeline or fail with NotFound.
    pub async fn require_pipeline(&self, id: i32) -> AppResult<pipeline::Model> {
        self.get_pipeline_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pipeline {}", id)))
    }

    /// All pipelines created at or after `since` (all when `None`), newest first.
    pub async fn list_pipelines_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<pipeline::Model>> {
        let mut query = Pipeline::find();
        if let Some(start) = since {
            query = query.filter(pipeline::Column::CreatedAt.gte(start));
        }

        let result = query
            .order_by_desc(pipeline::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list pipelines: {}", e)))?;

        Ok(result)
    }

    /// Update pipeline fields present in the request. `null` clears optional fields.
    pub async fn update_pipeline(
        &self,
        id: i32,
        req: UpdatePipelineRequest,
    ) -> AppResult<pipeline::Model> {
        let pipeline = self.require_pipeline(id).await?;

        let mut active: ActiveModel = pipeline.into();
        if let Some(name) = req.pipeline_name {
            active.pipeline_name = Set(required_text(&name, "pipeline_name")?);
        }
        if let Some(engineer) = req.engineer {
            active.engineer = Set(engineer);
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(images) = req.images {
            active.images = Set(encode_images(&images));
        }
        apply_patch(&mut active, &req.attributes);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update pipeline: {}", e)))?;

        Ok(result)
    }

    /// Write a pipeline status. Any status may follow any other.
    pub async fn set_pipeline_status(
        &self,
        id: i32,
        status: PipelineStatus,
    ) -> AppResult<pipeline::Model> {
        let pipeline = self.require_pipeline(id).await?;
        let previous = pipeline.status.clone();

        let mut active: ActiveModel = pipeline.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let result = active.update(self.connection()).await.map_err(|e| {
            AppError::Database(format!("Failed to update pipeline status: {}", e))
        })?;

        info!(pipeline_id = id, from = %previous, to = %status, "Pipeline status set");
        Ok(result)
    }

    /// Delete a pipeline with its supports, inspections and answers in one transaction.
    pub async fn delete_pipeline(&self, id: i32) -> AppResult<CascadeSummary> {
        let txn = self.connection().begin().await?;

        let support_ids: Vec<i32> = support::Entity::find()
            .select_only()
            .column(support::Column::Id)
            .filter(support::Column::PipelineId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to load supports: {}", e)))?;

        let inspections = delete_inspections_of_supports(&txn, &support_ids).await?;

        let supports = support::Entity::delete_many()
            .filter(support::Column::PipelineId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete supports: {}", e)))?
            .rows_affected;

        let deleted = Pipeline::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete pipeline: {}", e)))?;

        if deleted.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound(format!("Pipeline {}", id)));
        }

        txn.commit().await?;

        info!(
            pipeline_id = id,
            supports, inspections, "Pipeline deleted with its supports and inspections"
        );
        Ok(CascadeSummary {
            supports,
            inspections,
        })
    }

    /// Count supports and inspections per pipeline.
    pub async fn count_pipeline_children(
        &self,
        pipeline_ids: &[i32],
    ) -> AppResult<HashMap<i32, PipelineCounts>> {
        if pipeline_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let supports: Vec<(i32, i32)> = support::Entity::find()
            .select_only()
            .column(support::Column::Id)
            .column(support::Column::PipelineId)
            .filter(support::Column::PipelineId.is_in(pipeline_ids.to_vec()))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count supports: {}", e)))?;

        let support_ids: Vec<i32> = supports.iter().map(|(id, _)| *id).collect();
        let inspection_parents: Vec<i32> = if support_ids.is_empty() {
            Vec::new()
        } else {
            inspection::Entity::find()
                .select_only()
                .column(inspection::Column::SupportId)
                .filter(inspection::Column::SupportId.is_in(support_ids))
                .into_tuple()
                .all(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to count inspections: {}", e)))?
        };

        let owner: HashMap<i32, i32> = supports.iter().copied().collect();
        let mut counts: HashMap<i32, PipelineCounts> = pipeline_ids
            .iter()
            .map(|id| (*id, PipelineCounts::default()))
            .collect();

        for (_, pipeline_id) in &supports {
            if let Some(c) = counts.get_mut(pipeline_id) {
                c.supports += 1;
            }
        }
        for support_id in inspection_parents {
            if let Some(c) = owner.get(&support_id).and_then(|p| counts.get_mut(p)) {
                c.inspections += 1;
            }
        }

        Ok(counts)
    }
}
