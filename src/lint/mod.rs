//! Lint runners.
//!
//! Each runner wraps one external static-analysis tool and turns its
//! output into [`Finding`]s. Two shapes are supported:
//! - structured JSON records (pylint)
//! - one finding per text line, `path:line:col: CODE message` (flake8)
//!
//! A tool that exits non-zero because it found problems is not an error;
//! only failing to start, dying on a signal, or emitting output that
//! cannot be read are.

pub mod flake8;
pub mod pylint;

pub use flake8::Flake8;
pub use pylint::Pylint;

use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// One raw record reported by a linter, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Label stored on the issue, e.g. `Pylint (unused-import)` or `Flake8`.
    pub issue_type: String,
    pub path: String,
    pub line: usize,
    pub rule: Option<String>,
    pub message: String,
    /// Human-readable one-liner stored as the issue description.
    pub description: String,
}

impl Finding {
    /// Rewrite paths so they no longer mention the workspace directory.
    pub fn relative_to(mut self, root: &Path) -> Self {
        self.path = strip_workspace_prefix(&self.path, root);
        self.description = strip_workspace_prefix(&self.description, root);
        self
    }
}

/// An external static-analysis tool.
pub trait Linter {
    fn name(&self) -> &str;

    /// Lint `files` (absolute paths inside `root`), running from `root`.
    fn run(&self, files: &[PathBuf], root: &Path) -> Result<Vec<Finding>>;
}

/// Remove a leading `<root>/` from `text`, leaving the clone-relative path.
/// Only the prefix is touched; occurrences later in the text stay as-is.
pub fn strip_workspace_prefix(text: &str, root: &Path) -> String {
    let prefix = format!("{}{MAIN_SEPARATOR}", root.display());
    text.strip_prefix(&prefix).unwrap_or(text).to_string()
}

/// Captured result of a finished tool process.
pub(crate) struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl ToolOutput {
    /// A failing exit with nothing on stdout but a message on stderr is a
    /// crash (typically a Python traceback), not a clean run.
    pub fn check_crash(&self, tool: &str) -> Result<()> {
        if self.code != 0 && self.stdout.trim().is_empty() && !self.stderr.trim().is_empty() {
            return Err(Error::tool(
                tool,
                format!("exited with status {}: {}", self.code, self.stderr.trim()),
            ));
        }
        Ok(())
    }
}

/// Locate `program` on PATH (or as a path) and run it over `files`.
pub(crate) fn invoke(
    tool: &str,
    program: &str,
    args: &[&str],
    files: &[PathBuf],
    root: &Path,
) -> Result<ToolOutput> {
    let resolved =
        which::which(program).map_err(|e| Error::tool(tool, format!("{program}: {e}")))?;

    debug!(tool, program = %resolved.display(), files = files.len(), "running linter");
    let output = Command::new(&resolved)
        .args(args)
        .args(files)
        .current_dir(root)
        .output()
        .map_err(|e| Error::tool(tool, format!("failed to execute {program}: {e}")))?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let Some(code) = output.status.code() else {
        return Err(Error::tool(
            tool,
            format!("{program} was terminated ({}): {}", output.status, stderr.trim()),
        ));
    };

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr,
        code,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
