//! Report builder: aggregates a project's issues joined with their
//! analyses into a `ProjectReport`.
//!
//! Everything is derived from the joined rows, so analyses that produced
//! no issue contribute nothing, and an issue-free project reports zeros.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use rusqlite::Connection;
use tracing::debug;

use crate::db::issues::{self, IssueRow};
use crate::db::models::IssueStatus;
use crate::db::projects;
use crate::error::{Error, Result};

use super::data::*;

/// Build the report for `project_id`.
pub fn generate_project_report(conn: &Connection, project_id: i64) -> Result<ProjectReport> {
    let project =
        projects::find(conn, project_id)?.ok_or_else(|| Error::not_found("project", project_id))?;
    let rows = issues::joined_for_project(conn, project_id)?;
    debug!(project_id, rows = rows.len(), "building report");

    Ok(ProjectReport {
        project_id: project.id,
        project_name: project.name,
        total_analyses: distinct_analysis_dates(&rows),
        total_open_issues: rows
            .iter()
            .filter(|r| r.status == IssueStatus::Open)
            .count(),
        score_over_time: score_over_time(&rows),
        issues_by_type: count_by(rows.iter().map(|r| r.issue_type.as_str())),
        issues_by_status: count_by(rows.iter().map(|r| r.status.as_str())),
    })
}

fn distinct_analysis_dates(rows: &[IssueRow]) -> usize {
    rows.iter()
        .map(|r| r.analysis_date)
        .collect::<HashSet<_>>()
        .len()
}

/// Unique (date, score) pairs in ascending date order.
fn score_over_time(rows: &[IssueRow]) -> Vec<ScorePoint> {
    let mut points: Vec<ScorePoint> = rows
        .iter()
        .map(|r| ScorePoint {
            date: r.analysis_date,
            score: r.score,
        })
        .collect();
    points.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.score.total_cmp(&b.score))
    });
    points.dedup_by(|a, b| a.date == b.date && a.score.total_cmp(&b.score) == Ordering::Equal);
    points
}

/// Occurrences per label, most frequent first, ties by label.
pub(crate) fn count_by<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, value)| CategoryCount {
            category: category.to_string(),
            value,
        })
        .collect();
    out.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.category.cmp(&b.category)));
    out
}
