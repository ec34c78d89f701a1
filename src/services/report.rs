//! Pipeline report assembly.

use chrono::Utc;
use tracing::info;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{PipelineReport, ReportFields, ReportLine, SupportSummary};

use super::records::describe_pipeline;

/// Collect the data the report renderer prints for one pipeline.
///
/// Supports appear in creation order; each line carries the general visual
/// fields of that support's last inspection.
pub async fn build_pipeline_report(pool: &DbPool, pipeline_id: i32) -> AppResult<PipelineReport> {
    let pipeline = pool.require_pipeline(pipeline_id).await?;
    let supports = pool.get_supports_by_pipeline_id(pipeline_id).await?;

    let ids: Vec<i32> = supports.iter().map(|s| s.id).collect();
    let last = pool.last_inspections_for_supports(&ids).await?;

    let lines = supports
        .iter()
        .map(|s| {
            let inspection = last.get(&s.id);
            ReportLine {
                support: SupportSummary::build(s, inspection),
                fields: ReportFields::from_last_inspection(inspection),
            }
        })
        .collect::<Vec<_>>();

    info!(pipeline_id, supports = lines.len(), "Pipeline report built");

    Ok(PipelineReport {
        pipeline: describe_pipeline(pool, &pipeline).await?,
        supports: lines,
        generated_at: Utc::now(),
    })
}
