use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use super::issues;
use super::models::{Analysis, AnalysisDetail, Project, ProjectDetail};
use crate::error::{Error, Result};
use crate::fetch::project_name;

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        repo_url: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn analysis_from_row(row: &Row<'_>) -> rusqlite::Result<Analysis> {
    Ok(Analysis {
        id: row.get(0)?,
        project_id: row.get(1)?,
        score: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn find(conn: &Connection, id: i64) -> Result<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT id, name, repo_url, created_at FROM projects WHERE id = ?1",
            params![id],
            project_from_row,
        )
        .optional()?;
    Ok(project)
}

pub fn find_by_url(conn: &Connection, repo_url: &str) -> Result<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT id, name, repo_url, created_at FROM projects WHERE repo_url = ?1",
            params![repo_url],
            project_from_row,
        )
        .optional()?;
    Ok(project)
}

/// Look up the project for `repo_url`, inserting it on first sight.
pub fn get_or_create(conn: &Connection, repo_url: &str) -> Result<Project> {
    if let Some(project) = find_by_url(conn, repo_url)? {
        return Ok(project);
    }
    let name = project_name(repo_url);
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO projects (name, repo_url, created_at) VALUES (?1, ?2, ?3)",
        params![name, repo_url, created_at],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, name, "registered new project");
    Ok(Project {
        id,
        name,
        repo_url: repo_url.to_string(),
        created_at,
    })
}

pub fn list(conn: &Connection) -> Result<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, name, repo_url, created_at FROM projects ORDER BY id")?;
    let projects = stmt
        .query_map([], project_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(projects)
}

pub fn insert_analysis(conn: &Connection, project_id: i64, score: f64) -> Result<Analysis> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO analyses (project_id, score, created_at) VALUES (?1, ?2, ?3)",
        params![project_id, score, created_at],
    )?;
    Ok(Analysis {
        id: conn.last_insert_rowid(),
        project_id,
        score,
        created_at,
    })
}

/// Analyses of a project, oldest first.
pub fn analyses(conn: &Connection, project_id: i64) -> Result<Vec<Analysis>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, score, created_at FROM analyses
         WHERE project_id = ?1 ORDER BY created_at, id",
    )?;
    let analyses = stmt
        .query_map(params![project_id], analysis_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(analyses)
}

/// A project with every analysis and issue it owns.
pub fn detail(conn: &Connection, id: i64) -> Result<ProjectDetail> {
    let project = find(conn, id)?.ok_or_else(|| Error::not_found("project", id))?;
    let analyses = analyses(conn, id)?
        .into_iter()
        .map(|analysis| -> Result<AnalysisDetail> {
            let issues = issues::for_analysis(conn, analysis.id)?;
            Ok(AnalysisDetail { analysis, issues })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ProjectDetail { project, analyses })
}
