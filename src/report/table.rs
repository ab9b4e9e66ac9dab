use super::{CategoryCount, ProjectReport};
use crate::report_helpers::{max_width, pad, separator};

fn print_counts(title: &str, counts: &[CategoryCount]) {
    println!();
    println!(" {title}");
    if counts.is_empty() {
        println!("  (none)");
        return;
    }
    let w = max_width(counts.iter().map(|c| c.category.as_str()), 8);
    for c in counts {
        println!("  {}  {:>6}", pad(&c.category, w), c.value);
    }
}

pub fn print_report(report: &ProjectReport) {
    let sep = separator(60);
    println!("{sep}");
    println!(
        " Report: {} (project {})",
        report.project_name, report.project_id
    );
    println!("{sep}");
    println!(" Analyses:     {}", report.total_analyses);
    println!(" Open issues:  {}", report.total_open_issues);

    println!();
    println!(" Score over time");
    if report.score_over_time.is_empty() {
        println!("  (none)");
    }
    for point in &report.score_over_time {
        println!(
            "  {}  {:>6.1}",
            point.date.format("%Y-%m-%d %H:%M:%S"),
            point.score
        );
    }

    print_counts("Issues by type", &report.issues_by_type);
    print_counts("Issues by status", &report.issues_by_status);
    println!("{sep}");
}
