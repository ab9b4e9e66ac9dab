use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Finding, Linter, invoke};
use crate::error::{Error, Result};

/// Family name and the issue type of every flake8 finding.
pub const FLAKE8: &str = "Flake8";

/// Highest exit status flake8 uses for a completed run (1 = violations found).
const FINDINGS_EXIT: i32 = 1;

/// Flake8 with its default `path:row:col: CODE text` format.
pub struct Flake8 {
    program: String,
}

impl Flake8 {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Linter for Flake8 {
    fn name(&self) -> &str {
        "flake8"
    }

    fn run(&self, files: &[PathBuf], root: &Path) -> Result<Vec<Finding>> {
        let out = invoke(self.name(), &self.program, &[], files, root)?;
        if out.code > FINDINGS_EXIT {
            return Err(Error::tool(
                self.name(),
                format!("exited with status {}: {}", out.code, out.stderr.trim()),
            ));
        }
        out.check_crash(self.name())?;
        let findings = parse_output(&out.stdout);
        debug!(count = findings.len(), exit = out.code, "flake8 finished");
        Ok(findings)
    }
}

/// Every non-blank line is one finding. The line itself is kept as the
/// description; location and code are extracted when the line has them.
pub fn parse_output(stdout: &str) -> Vec<Finding> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(raw: &str) -> Finding {
    let mut parts = raw.splitn(3, ':');
    let path = parts.next().unwrap_or_default();
    let line = parts.next().and_then(|l| l.trim().parse::<usize>().ok());
    let rest = parts.next();

    let (path, line, text) = match (line, rest) {
        (Some(line), Some(rest)) => (path.to_string(), line, skip_column(rest)),
        _ => (String::new(), 0, raw.trim()),
    };

    let (rule, message) = match text.split_once(' ') {
        Some((code, msg)) if is_rule_code(code) => (Some(code.to_string()), msg.trim()),
        _ if is_rule_code(text) => (Some(text.to_string()), ""),
        _ => (None, text),
    };

    Finding {
        issue_type: FLAKE8.to_string(),
        path,
        line,
        rule,
        message: message.to_string(),
        description: raw.to_string(),
    }
}

/// Drop a leading `col:` if present.
fn skip_column(rest: &str) -> &str {
    match rest.split_once(':') {
        Some((col, tail)) if col.trim().parse::<usize>().is_ok() => tail.trim(),
        _ => rest.trim(),
    }
}

/// Flake8 codes look like `E501`, `W291`, `F401`, `ABC123`.
fn is_rule_code(s: &str) -> bool {
    let letters = s.chars().take_while(|c| c.is_ascii_uppercase()).count();
    letters > 0 && letters < s.len() && s[letters..].chars().all(|c| c.is_ascii_digit())
}
