/// Data structures for the project report.
///
/// Populated by the builder and consumed by the table, JSON and markdown
/// formatters.
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Dashboard summary for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectReport {
    pub project_id: i64,
    pub project_name: String,
    /// Distinct analysis timestamps among analyses that produced issues.
    pub total_analyses: usize,
    pub total_open_issues: usize,
    /// Distinct (date, score) pairs, oldest first.
    pub score_over_time: Vec<ScorePoint>,
    pub issues_by_type: Vec<CategoryCount>,
    pub issues_by_status: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: DateTime<Utc>,
    pub score: f64,
}

/// One bar of a categorical chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub value: usize,
}
