//! Turn stored rows into API views with their derived fields.

use crate::db::DbPool;
use crate::entity::{pipeline, support};
use crate::error::AppResult;
use crate::models::{PipelineResponse, SupportResponse};

/// Attach support and inspection counts to pipelines, keeping their order.
pub async fn describe_pipelines(
    pool: &DbPool,
    pipelines: &[pipeline::Model],
) -> AppResult<Vec<PipelineResponse>> {
    let ids: Vec<i32> = pipelines.iter().map(|p| p.id).collect();
    let counts = pool.count_pipeline_children(&ids).await?;

    Ok(pipelines
        .iter()
        .map(|p| {
            let c = counts.get(&p.id).copied().unwrap_or_default();
            PipelineResponse::build(p, c.supports, c.inspections)
        })
        .collect())
}

pub async fn describe_pipeline(
    pool: &DbPool,
    pipeline: &pipeline::Model,
) -> AppResult<PipelineResponse> {
    let mut described = describe_pipelines(pool, std::slice::from_ref(pipeline)).await?;
    Ok(described
        .pop()
        .unwrap_or_else(|| PipelineResponse::build(pipeline, 0, 0)))
}

/// Attach inspection counts, last inspection and report fields to supports.
pub async fn describe_supports(
    pool: &DbPool,
    supports: &[support::Model],
) -> AppResult<Vec<SupportResponse>> {
    let ids: Vec<i32> = supports.iter().map(|s| s.id).collect();
    let counts = pool.count_inspections_by_support(&ids).await?;
    let last = pool.last_inspections_for_supports(&ids).await?;

    Ok(supports
        .iter()
        .map(|s| {
            let count = counts.get(&s.id).copied().unwrap_or(0);
            SupportResponse::build(s, count, last.get(&s.id))
        })
        .collect())
}

pub async fn describe_support(
    pool: &DbPool,
    support: &support::Model,
) -> AppResult<SupportResponse> {
    let mut described = describe_supports(pool, std::slice::from_ref(support)).await?;
    Ok(described
        .pop()
        .unwrap_or_else(|| SupportResponse::build(support, 0, None)))
}
