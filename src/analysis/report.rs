use super::AnalysisOutcome;
use crate::report_helpers::{separator, truncate};

/// Widest description printed before truncation.
const DESCRIPTION_WIDTH: usize = 100;

pub fn print_outcome(url: &str, outcome: &AnalysisOutcome) {
    let sep = separator(68);
    println!("{sep}");
    println!(" Analysis #{} of {url}", outcome.analysis_id);
    println!("{sep}");
    println!(" Project id:  {}", outcome.project_id);
    println!(" Score:       {:.1} / 100", outcome.score);
    println!(" Issues:      {}", outcome.issues.len());

    if outcome.issues.is_empty() {
        println!("{sep}");
        return;
    }
    println!("{sep}");
    for description in &outcome.issues {
        println!(" {}", truncate(description, DESCRIPTION_WIDTH));
    }
    println!("{sep}");
}
