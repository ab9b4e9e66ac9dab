//! Analysis pipeline: fetch, enumerate, lint, score, persist.
//!
//! The project row is created (or found) first and committed on its own.
//! Everything after that runs inside one transaction that is committed
//! only when every stage succeeded. The clone lives in a [`Workspace`]
//! that is released whatever the outcome.

mod report;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::models::Project;
use crate::db::{Store, issues, projects};
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, GitFetcher, Workspace};
use crate::lint::{Finding, Flake8, Linter, Pylint};
use crate::report_helpers;
use crate::score::{ScoreWeights, compute_score};
use crate::walk::{SourceFilter, source_files};
use report::print_outcome;

/// Result of one committed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub analysis_id: i64,
    pub project_id: i64,
    pub score: f64,
    /// Issue descriptions in insertion order (structured findings first).
    pub issues: Vec<String>,
}

pub struct Pipeline {
    fetcher: Box<dyn Fetcher>,
    structured: Box<dyn Linter>,
    text: Box<dyn Linter>,
    weights: ScoreWeights,
    filter: SourceFilter,
}

impl Pipeline {
    pub fn new(
        fetcher: Box<dyn Fetcher>,
        structured: Box<dyn Linter>,
        text: Box<dyn Linter>,
        weights: ScoreWeights,
        filter: SourceFilter,
    ) -> Self {
        Self {
            fetcher,
            structured,
            text,
            weights,
            filter,
        }
    }

    /// Git clone, pylint and flake8, configured from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Box::new(GitFetcher::new()),
            Box::new(Pylint::new(cfg.linters.pylint.clone())),
            Box::new(Flake8::new(cfg.linters.flake8.clone())),
            ScoreWeights::from(&cfg.scoring),
            SourceFilter::from_config(&cfg.analysis),
        )
    }

    /// Analyze the repository at `url` and persist the result.
    pub fn run(&self, store: &mut Store, url: &str) -> Result<AnalysisOutcome> {
        let project = projects::get_or_create(store.conn(), url)?;
        let workspace = Workspace::create()?;
        info!(project = %project.name, url, "analysis started");

        let result = self.run_in(store, &project, workspace.path());
        workspace.release();
        result
    }

    fn run_in(&self, store: &mut Store, project: &Project, root: &Path) -> Result<AnalysisOutcome> {
        let tx = store.transaction()?;
        match self.stage(&tx, project, root) {
            Ok(outcome) => {
                tx.commit()?;
                info!(
                    analysis_id = outcome.analysis_id,
                    score = outcome.score,
                    issues = outcome.issues.len(),
                    "analysis committed"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(url = %project.repo_url, "analysis failed, rolling back: {err}");
                if let Err(rb) = tx.rollback() {
                    warn!("rollback failed: {rb}");
                }
                Err(err)
            }
        }
    }

    fn stage(&self, conn: &Connection, project: &Project, root: &Path) -> Result<AnalysisOutcome> {
        self.fetcher.fetch(&project.repo_url, root)?;

        let files = source_files(root, &self.filter);
        if files.is_empty() {
            return Err(Error::NoAnalyzableFiles {
                extension: self.filter.extension().to_string(),
            });
        }
        debug!(files = files.len(), "source files collected");

        let structured = lint(self.structured.as_ref(), &files, root)?;
        let text = lint(self.text.as_ref(), &files, root)?;

        let score = compute_score(structured.len(), text.len(), &self.weights);
        let analysis = projects::insert_analysis(conn, project.id, score)?;

        let mut descriptions = Vec::with_capacity(structured.len() + text.len());
        for finding in structured.iter().chain(&text) {
            issues::insert(conn, analysis.id, &finding.issue_type, &finding.description)?;
            descriptions.push(finding.description.clone());
        }

        Ok(AnalysisOutcome {
            analysis_id: analysis.id,
            project_id: project.id,
            score,
            issues: descriptions,
        })
    }
}

fn lint(linter: &dyn Linter, files: &[PathBuf], root: &Path) -> Result<Vec<Finding>> {
    info!(linter = linter.name(), "running");
    let findings = linter
        .run(files, root)?
        .into_iter()
        .map(|f| f.relative_to(root))
        .collect::<Vec<_>>();
    debug!(linter = linter.name(), findings = findings.len(), "lint done");
    Ok(findings)
}

pub fn run(store: &mut Store, cfg: &Config, url: &str, json: bool) -> Result<()> {
    let outcome = Pipeline::from_config(cfg).run(store, url)?;
    if json {
        report_helpers::print_json_stdout(&outcome)
    } else {
        print_outcome(url, &outcome);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
