//! Database queries for supports.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::support::{self, ActiveModel, Entity as Support};
use crate::error::{AppError, AppResult};
use crate::models::support::DEFAULT_AREA_TYPE;
use crate::models::{CreateSupportRequest, UpdateSupportRequest, required_text};

use super::DbPool;
use super::inspections::delete_inspections_of_supports;

impl DbPool {
    /// Insert a support under an existing pipeline.
    pub async fn insert_support(
        &self,
        pipeline_id: i32,
        req: CreateSupportRequest,
    ) -> AppResult<support::Model> {
        self.require_pipeline(pipeline_id).await?;
        let code = required_text(&req.support_code, "support_code")?;
        let now = Utc::now();

        let model = ActiveModel {
            pipeline_id: Set(pipeline_id),
            support_code: Set(code),
            support_level: Set(req.support_level),
            pipe_ref: Set(req.pipe_ref),
            cup_type: Set(req.cup_type.map(|c| c.as_str().to_string())),
            area_type: Set(req
                .area_type
                .unwrap_or_else(|| DEFAULT_AREA_TYPE.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert support: {}", e)))?;

        info!(
            support_id = result.id,
            pipeline_id, code = %result.support_code, "Support created"
        );
        Ok(result)
    }

    /// Get a support by ID.
    pub async fn get_support_by_id(&self, id: i32) -> AppResult<Option<support::Model>> {
        let result = Support::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get support: {}", e)))?;

        Ok(result)
    }

    /// Get a support or fail with NotFound.
    pub async fn require_support(&self, id: i32) -> AppResult<support::Model> {
        self.get_support_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Support {}", id)))
    }

    /// All supports of a pipeline in creation order.
    pub async fn get_supports_by_pipeline_id(
        &self,
        pipeline_id: i32,
    ) -> AppResult<Vec<support::Model>> {
        let result = Support::find()
            .filter(support::Column::PipelineId.eq(pipeline_id))
            .order_by_asc(support::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get supports for pipeline: {}", e)))?;

        Ok(result)
    }

    /// Update support fields present in the request. `null` clears optional fields.
    pub async fn update_support(
        &self,
        id: i32,
        req: UpdateSupportRequest,
    ) -> AppResult<support::Model> {
        let support = self.require_support(id).await?;

        let mut active: ActiveModel = support.into();
        if let Some(code) = req.support_code {
            active.support_code = Set(required_text(&code, "support_code")?);
        }
        if let Some(level) = req.support_level {
            active.support_level = Set(level);
        }
        if let Some(pipe_ref) = req.pipe_ref {
            active.pipe_ref = Set(pipe_ref);
        }
        if let Some(cup_type) = req.cup_type {
            active.cup_type = Set(cup_type.map(|c| c.as_str().to_string()));
        }
        if let Some(area_type) = req.area_type {
            active.area_type = Set(area_type);
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update support: {}", e)))?;

        Ok(result)
    }

    /// Delete a support with its inspections. Returns the number of inspections removed.
    pub async fn delete_support(&self, id: i32) -> AppResult<u64> {
        let txn = self.connection().begin().await?;

        let inspections = delete_inspections_of_supports(&txn, &[id]).await?;

        let deleted = Support::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete support: {}", e)))?;

        if deleted.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Support {}", id)));
        }

        txn.commit().await?;

        info!(support_id = id, inspections, "Support deleted");
        Ok(inspections)
    }
}
