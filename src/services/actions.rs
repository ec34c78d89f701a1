//! Action dispatch for pipelines, supports and the dashboard.
//!
//! Actions either write record state or describe the form the UI should open
//! next. Nothing here keeps state between calls.

use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ActionOutcome, DashboardAction, Navigation, PipelineAction, PipelineStatus, SupportAction,
    TargetEntity, TimeFilter, ViewVariant,
};

use super::dashboard::set_filter;
use super::report::build_pipeline_report;

pub fn parse_pipeline_action(name: &str) -> AppResult<PipelineAction> {
    PipelineAction::parse(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown pipeline action '{}'", name)))
}

pub fn parse_support_action(name: &str) -> AppResult<SupportAction> {
    SupportAction::parse(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown support action '{}'", name)))
}

pub fn parse_dashboard_action(name: &str) -> AppResult<DashboardAction> {
    DashboardAction::parse(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown dashboard action '{}'", name)))
}

/// Run an action on a pipeline. `active_id` is the support selected in the
/// pipeline view, used by `edit_support`.
pub async fn run_pipeline_action(
    pool: &DbPool,
    pipeline_id: i32,
    action: PipelineAction,
    active_id: Option<i32>,
) -> AppResult<ActionOutcome> {
    info!(pipeline_id, ?action, "Pipeline action");

    match action {
        PipelineAction::SetInProgress => {
            pool.set_pipeline_status(pipeline_id, PipelineStatus::InProgress)
                .await?;
            Ok(ActionOutcome::Noop)
        }
        PipelineAction::SetDone => {
            pool.set_pipeline_status(pipeline_id, PipelineStatus::Done)
                .await?;
            Ok(ActionOutcome::Noop)
        }
        PipelineAction::ResetDraft => {
            pool.set_pipeline_status(pipeline_id, PipelineStatus::Pending)
                .await?;
            Ok(ActionOutcome::Noop)
        }
        PipelineAction::AddSupport => {
            pool.require_pipeline(pipeline_id).await?;
            Ok(Navigation::create(TargetEntity::Support)
                .with_default("pipeline_id", pipeline_id)
                .with_variant(ViewVariant::SupportCreate)
                .in_dialog()
                .titled("Add Support")
                .into())
        }
        PipelineAction::Delete => {
            pool.delete_pipeline(pipeline_id).await?;
            Ok(ActionOutcome::CloseView)
        }
        PipelineAction::PrintReport => {
            let report = build_pipeline_report(pool, pipeline_id).await?;
            Ok(ActionOutcome::Report {
                report: Box::new(report),
            })
        }
        PipelineAction::OpenForm => {
            pool.require_pipeline(pipeline_id).await?;
            Ok(Navigation::edit(TargetEntity::Pipeline, pipeline_id).into())
        }
        PipelineAction::EditSupport => {
            pool.require_pipeline(pipeline_id).await?;
            match active_id {
                Some(support_id) => {
                    let support = pool.require_support(support_id).await?;
                    if support.pipeline_id != pipeline_id {
                        return Err(AppError::NotFound(format!(
                            "Support {} on pipeline {}",
                            support_id, pipeline_id
                        )));
                    }
                    Ok(Navigation::edit(TargetEntity::Support, support_id).into())
                }
                None => Ok(Navigation::create(TargetEntity::Support)
                    .with_default("pipeline_id", pipeline_id)
                    .into()),
            }
        }
    }
}

/// Run an action on a support.
pub async fn run_support_action(
    pool: &DbPool,
    support_id: i32,
    action: SupportAction,
) -> AppResult<ActionOutcome> {
    info!(support_id, ?action, "Support action");
    pool.require_support(support_id).await?;

    match action {
        SupportAction::EditLastInspection => {
            let navigation = match last_inspection_id(pool, support_id).await? {
                Some(id) => Navigation::edit(TargetEntity::Inspection, id),
                None => Navigation::create(TargetEntity::Inspection)
                    .with_default("support_id", support_id),
            };
            Ok(navigation.in_dialog().titled("Inspection").into())
        }
        SupportAction::ViewInspection => match last_inspection_id(pool, support_id).await? {
            Some(id) => Ok(Navigation::view(TargetEntity::Inspection, id)
                .with_variant(ViewVariant::InspectionReport)
                .titled("Inspection Report")
                .into()),
            None => Ok(ActionOutcome::Noop),
        },
        SupportAction::SaveAndOpen => Ok(Navigation::edit(TargetEntity::Support, support_id).into()),
        SupportAction::AddInspection => Ok(Navigation::create(TargetEntity::Inspection)
            .with_default("support_id", support_id)
            .in_dialog()
            .titled("New Inspection")
            .into()),
    }
}

async fn last_inspection_id(pool: &DbPool, support_id: i32) -> AppResult<Option<i32>> {
    let last = pool.last_inspections_for_supports(&[support_id]).await?;
    Ok(last.get(&support_id).map(|i| i.id))
}

/// Run a dashboard action.
pub async fn run_dashboard_action(pool: &DbPool, action: DashboardAction) -> AppResult<ActionOutcome> {
    let filter = match action {
        DashboardAction::SetFilterAll => TimeFilter::All,
        DashboardAction::SetFilterMonth => TimeFilter::Month,
        DashboardAction::SetFilterToday => TimeFilter::Today,
        DashboardAction::CreateNewPipeline => {
            return Ok(Navigation::create(TargetEntity::Pipeline).into());
        }
    };

    set_filter(pool, filter).await?;
    Ok(ActionOutcome::Reload)
}
