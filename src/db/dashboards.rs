//! Database queries for the dashboard record.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::entity::dashboard::{self, ActiveModel, Entity as Dashboard};
use crate::error::{AppError, AppResult};
use crate::models::TimeFilter;
use crate::models::dashboard::DEFAULT_DASHBOARD_NAME;

use super::DbPool;

impl DbPool {
    /// Return the first dashboard, creating the default one on first use.
    pub async fn get_or_create_dashboard(&self) -> AppResult<dashboard::Model> {
        let existing = Dashboard::find()
            .order_by_asc(dashboard::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get dashboard: {}", e)))?;

        if let Some(model) = existing {
            return Ok(model);
        }

        let now = Utc::now();
        let model = ActiveModel {
            name: Set(DEFAULT_DASHBOARD_NAME.to_string()),
            filter_option: Set(TimeFilter::default().as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to create dashboard: {}", e)))?;

        info!(dashboard_id = model.id, "Dashboard created");
        Ok(model)
    }

    /// Persist the dashboard's time filter.
    pub async fn set_dashboard_filter(&self, filter: TimeFilter) -> AppResult<dashboard::Model> {
        let dashboard = self.get_or_create_dashboard().await?;

        let mut active: ActiveModel = dashboard.into();
        active.filter_option = Set(filter.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update dashboard: {}", e)))?;

        info!(filter = filter.as_str(), "Dashboard filter set");
        Ok(result)
    }
}
