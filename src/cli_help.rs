//! Long help text constants for CLI subcommands.
//!
//! Kept out of `cli.rs` so the argument definitions stay short.

/// Analysis pipeline: clone, lint, score, persist.
pub const ANALYZE: &str = "\
Clone a repository and record a quality analysis of its Python sources.

The repository is shallow-cloned into a temporary directory, every .py file
outside hidden directories and venv is linted with pylint (JSON output) and
flake8, and the findings are stored as open issues.

Score:
  score = max(0, 100 - 1.0 * pylint_findings - 0.5 * flake8_findings)

The penalties, source extension, skipped directories and linter programs
can be changed in debtquest.toml. Nothing is stored when any step fails.

Examples:
  dq analyze https://github.com/psf/requests
  dq analyze ../local/repo --json";

/// Project report: score history and issue breakdown.
pub const REPORT: &str = "\
Summarize the analysis history of a project.

Shows the score of every analysis that produced issues (oldest first), the
number of distinct analyses, the open issue count and issue counts per type
and per status. A project without issues reports zeros.

Examples:
  dq report 1
  dq report 1 --markdown > report.md
  dq report 1 --json";

/// Issue resolution and gamification rules.
pub const RESOLVE: &str = "\
Mark an open issue as resolved and collect points.

Points (first match wins):
  Pylint (line-too-long)  1
  any other Pylint issue  5
  Flake8                  3
  anything else           1

Badges:
  First Fix      resolve 1 issue
  Bug Squasher   resolve 10 issues
  Code Cleaner   resolve 5 Pylint issues

An issue can be resolved only once. Credentials come from --user and
--password or the DQ_USER and DQ_PASSWORD environment variables.

Examples:
  dq resolve 42 --user ada --password s3cret
  DQ_USER=ada DQ_PASSWORD=s3cret dq resolve 42";
