//! Dashboard statistics over pipelines in the selected creation window.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::db::DbPool;
use crate::entity::pipeline;
use crate::error::AppResult;
use crate::models::{DashboardMetrics, DashboardResponse, PipelineStatus, PipelineSummary, TimeFilter};

/// Number of pipelines listed under "recent".
pub const RECENT_PIPELINES: usize = 5;

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// Compute the dashboard figures for a set of pipelines.
pub fn compute_metrics(pipelines: &[pipeline::Model]) -> DashboardMetrics {
    let total = pipelines.len() as u64;
    let mut done = 0;
    let mut in_progress = 0;
    let mut pending = 0;
    let mut active = 0;
    let mut engineers = HashSet::new();

    for p in pipelines {
        let status = PipelineStatus::parse(&p.status).unwrap_or_default();
        match status {
            PipelineStatus::Done => done += 1,
            PipelineStatus::InProgress => in_progress += 1,
            PipelineStatus::Pending => pending += 1,
            PipelineStatus::Cancelled => {}
        }
        if status.is_active() {
            active += 1;
        }
        if let Some(engineer) = p.engineer.as_deref() {
            engineers.insert(engineer);
        }
    }

    DashboardMetrics {
        total_pipelines: total,
        active_inspections: active,
        engineers_count: engineers.len() as u64,
        percent_done: percent(done, total),
        percent_in_progress: percent(in_progress, total),
        percent_pending: percent(pending, total),
    }
}

/// Newest pipelines first, at most [`RECENT_PIPELINES`].
pub fn recent_pipelines(pipelines: &[pipeline::Model]) -> Vec<PipelineSummary> {
    let mut newest: Vec<&pipeline::Model> = pipelines.iter().collect();
    newest.sort_by(|a, b| b.id.cmp(&a.id));
    newest
        .into_iter()
        .take(RECENT_PIPELINES)
        .map(PipelineSummary::from)
        .collect()
}

/// Load the dashboard and compute its statistics as of `now`.
pub async fn load_dashboard(pool: &DbPool, now: DateTime<Utc>) -> AppResult<DashboardResponse> {
    let dashboard = pool.get_or_create_dashboard().await?;
    let filter = TimeFilter::parse(&dashboard.filter_option).unwrap_or_default();
    let window_start = filter.window_start(now);

    let pipelines = pool.list_pipelines_since(window_start).await?;

    Ok(DashboardResponse {
        id: dashboard.id,
        name: dashboard.name,
        filter_option: filter,
        window_start,
        metrics: compute_metrics(&pipelines),
        recent_pipelines: recent_pipelines(&pipelines),
    })
}

/// Persist a new time filter.
pub async fn set_filter(pool: &DbPool, filter: TimeFilter) -> AppResult<()> {
    let dashboard = pool.set_dashboard_filter(filter).await?;
    info!(dashboard_id = dashboard.id, filter = %filter.label(), "Dashboard filter changed");
    Ok(())
}
