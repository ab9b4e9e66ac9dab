use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{Finding, Linter, invoke};
use crate::error::{Error, Result};

/// Family name; also the prefix of every issue type this runner emits.
pub const PYLINT: &str = "Pylint";

/// Exit-status bit pylint sets when it was invoked incorrectly.
const USAGE_ERROR: i32 = 32;

/// Pylint with `--output-format=json`.
pub struct Pylint {
    program: String,
}

/// One message from pylint's JSON reporter. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct Message {
    path: String,
    line: usize,
    symbol: String,
    message: String,
    #[serde(rename = "message-id", default)]
    message_id: Option<String>,
}

impl Pylint {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Linter for Pylint {
    fn name(&self) -> &str {
        "pylint"
    }

    fn run(&self, files: &[PathBuf], root: &Path) -> Result<Vec<Finding>> {
        let out = invoke(
            self.name(),
            &self.program,
            &["--output-format=json"],
            files,
            root,
        )?;
        if out.code & USAGE_ERROR != 0 {
            return Err(Error::tool(
                self.name(),
                format!("usage error: {}", out.stderr.trim()),
            ));
        }
        out.check_crash(self.name())?;
        let findings = parse_output(&out.stdout)?;
        debug!(count = findings.len(), exit = out.code, "pylint finished");
        Ok(findings)
    }
}

/// Parse pylint's JSON array. Blank output means no messages.
pub fn parse_output(stdout: &str) -> Result<Vec<Finding>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let messages: Vec<Message> = serde_json::from_str(stdout)
        .map_err(|e| Error::tool("pylint", format!("unreadable JSON output: {e}")))?;

    Ok(messages
        .into_iter()
        .map(|m| Finding {
            issue_type: format!("{PYLINT} ({})", m.symbol),
            description: format!("{}:{}: {}", m.path, m.line, m.message),
            path: m.path,
            line: m.line,
            rule: Some(m.message_id.unwrap_or(m.symbol)),
            message: m.message,
        })
        .collect())
}
