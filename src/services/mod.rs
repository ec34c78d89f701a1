//! Business logic services.

pub mod actions;
pub mod dashboard;
pub mod records;
pub mod report;

pub use actions::{run_dashboard_action, run_pipeline_action, run_support_action};
pub use dashboard::{compute_metrics, load_dashboard};
pub use records::{describe_pipeline, describe_pipelines, describe_support, describe_supports};
pub use report::build_pipeline_report;
