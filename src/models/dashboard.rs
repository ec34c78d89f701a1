//! Dashboard models.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pipeline::PipelineSummary;

/// Name given to the dashboard when it is first created.
pub const DEFAULT_DASHBOARD_NAME: &str = "Main Dashboard";

/// Creation-time window applied to dashboard statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    #[default]
    All,
    Month,
    Today,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::Today => "today",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "month" => Some(Self::Month),
            "today" => Some(Self::Today),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Month => "This Month",
            Self::Today => "Today",
        }
    }

    /// Earliest creation time included by this filter, in UTC.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = match self {
            Self::All => return None,
            Self::Month => now.date_naive().with_day(1)?,
            Self::Today => now.date_naive(),
        };
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&midnight))
    }
}

/// Aggregate statistics over the pipelines inside the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardMetrics {
    pub total_pipelines: u64,
    /// Pipelines still pending or in progress.
    pub active_inspections: u64,
    /// Distinct assigned engineers.
    pub engineers_count: u64,
    pub percent_done: f64,
    pub percent_in_progress: f64,
    pub percent_pending: f64,
}

/// Dashboard with its current filter and computed statistics.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub id: i32,
    pub name: String,
    pub filter_option: TimeFilter,
    /// Start of the active window; absent for "all".
    pub window_start: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
    /// Up to five newest pipelines in the window, newest first.
    pub recent_pipelines: Vec<PipelineSummary>,
}
