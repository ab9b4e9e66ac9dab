use super::{CategoryCount, ProjectReport};

/// Escape backslashes and pipe characters so markdown tables render
/// correctly. Backslashes must be escaped first to avoid double-escaping.
fn escape_md(s: &str) -> String {
    s.replace('\\', "\\\\").replace('|', "\\|")
}

fn print_counts(title: &str, label: &str, counts: &[CategoryCount]) {
    println!();
    println!("## {title}");
    println!();
    if counts.is_empty() {
        println!("No issues recorded.");
        return;
    }
    println!("| {label} | Count |");
    println!("|{}|------:|", "-".repeat(label.len() + 2));
    for c in counts {
        println!("| {} | {} |", escape_md(&c.category), c.value);
    }
}

pub fn print_markdown(report: &ProjectReport) {
    println!("# Technical Debt Report: {}", escape_md(&report.project_name));
    println!();
    println!("**Project id:** {}", report.project_id);
    println!();
    println!("| Metric | Value |");
    println!("|--------|------:|");
    println!("| Analyses | {} |", report.total_analyses);
    println!("| Open issues | {} |", report.total_open_issues);

    println!();
    println!("## Score Over Time");
    println!();
    if report.score_over_time.is_empty() {
        println!("No analyses with issues yet.");
    } else {
        println!("| Date | Score |");
        println!("|------|------:|");
        for point in &report.score_over_time {
            println!(
                "| {} | {:.1} |",
                point.date.format("%Y-%m-%d %H:%M:%S"),
                point.score
            );
        }
    }

    print_counts("Issues by Type", "Type", &report.issues_by_type);
    print_counts("Issues by Status", "Status", &report.issues_by_status);
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
