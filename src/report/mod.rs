//! Project report (`dq report` command).
//!
//! Aggregates every issue of a project, joined with the analysis that
//! found it, into score history and per-type and per-status counts, and
//! prints the result as a table, markdown or JSON.

/// Aggregation over the joined issue rows.
mod builder;
/// Data structures for the report.
pub(crate) mod data;
/// JSON serialization of the report.
mod json;
/// Markdown formatting of the report.
mod markdown;
/// Terminal table formatting of the report.
mod table;

pub use builder::generate_project_report;
pub use data::*;

use crate::db::Store;
use crate::error::Result;

/// Entry point: build the report and print it in the requested format.
pub fn run(store: &Store, project_id: i64, json: bool, markdown: bool) -> Result<()> {
    let report = generate_project_report(store.conn(), project_id)?;

    if json {
        json::print_json(&report)?;
    } else if markdown {
        markdown::print_markdown(&report);
    } else {
        table::print_report(&report);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
