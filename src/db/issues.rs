use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::models::{Issue, IssueStatus};
use crate::error::Result;

const COLUMNS: &str = "id, analysis_id, issue_type, description, status, resolver_id";

fn issue_from_row(row: &Row<'_>) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        analysis_id: row.get(1)?,
        issue_type: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        resolver_id: row.get(5)?,
    })
}

pub fn insert(
    conn: &Connection,
    analysis_id: i64,
    issue_type: &str,
    description: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO issues (analysis_id, issue_type, description, status)
         VALUES (?1, ?2, ?3, ?4)",
        params![analysis_id, issue_type, description, IssueStatus::Open],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: i64) -> Result<Option<Issue>> {
    let issue = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM issues WHERE id = ?1"),
            params![id],
            issue_from_row,
        )
        .optional()?;
    Ok(issue)
}

pub fn for_analysis(conn: &Connection, analysis_id: i64) -> Result<Vec<Issue>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM issues WHERE analysis_id = ?1 ORDER BY id"
    ))?;
    let issues = stmt
        .query_map(params![analysis_id], issue_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(issues)
}

/// Flip an open issue to resolved. Returns `false` when the issue was not
/// open any more, so a concurrent resolution cannot be applied twice.
pub fn mark_resolved(conn: &Connection, id: i64, resolver_id: i64) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE issues SET status = ?1, resolver_id = ?2 WHERE id = ?3 AND status = ?4",
        params![IssueStatus::Resolved, resolver_id, id, IssueStatus::Open],
    )?;
    Ok(changed == 1)
}

/// Issues resolved by `user_id`, optionally only those whose type label
/// contains `type_contains` (case-sensitive).
pub fn count_resolved_by(
    conn: &Connection,
    user_id: i64,
    type_contains: Option<&str>,
) -> Result<usize> {
    let count = match type_contains {
        None => conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE resolver_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?,
        Some(needle) => conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE resolver_id = ?1 AND instr(issue_type, ?2) > 0",
            params![user_id, needle],
            |row| row.get(0),
        )?,
    };
    Ok(count)
}

/// One issue joined with the analysis it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRow {
    pub issue_id: i64,
    pub issue_type: String,
    pub status: IssueStatus,
    pub analysis_date: DateTime<Utc>,
    pub score: f64,
}

/// Every issue of every analysis of a project.
pub fn joined_for_project(conn: &Connection, project_id: i64) -> Result<Vec<IssueRow>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.issue_type, i.status, a.created_at, a.score
         FROM issues i
         JOIN analyses a ON i.analysis_id = a.id
         WHERE a.project_id = ?1
         ORDER BY i.id",
    )?;
    let rows = stmt
        .query_map(params![project_id], |row| {
            Ok(IssueRow {
                issue_id: row.get(0)?,
                issue_type: row.get(1)?,
                status: row.get(2)?,
                analysis_date: row.get(3)?,
                score: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
