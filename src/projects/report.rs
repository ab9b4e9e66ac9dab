use crate::db::models::{Project, ProjectDetail};
use crate::report_helpers::{max_width, pad, separator, truncate};

const DESCRIPTION_WIDTH: usize = 80;

pub fn print_list(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects analyzed yet.");
        return;
    }
    let name_w = max_width(projects.iter().map(|p| p.name.as_str()), 4);
    let url_w = max_width(projects.iter().map(|p| p.repo_url.as_str()), 3);
    let sep = separator(name_w + url_w + 10);

    println!("{sep}");
    println!(" {:>5}  {}  {}", "ID", pad("Name", name_w), "URL");
    println!("{sep}");
    for p in projects {
        println!(" {:>5}  {}  {}", p.id, pad(&p.name, name_w), p.repo_url);
    }
    println!("{sep}");
}

pub fn print_detail(detail: &ProjectDetail) {
    let sep = separator(72);
    let project = &detail.project;
    println!("{sep}");
    println!(" {} (project {})", project.name, project.id);
    println!(" {}", project.repo_url);
    println!("{sep}");

    if detail.analyses.is_empty() {
        println!(" No analyses yet.");
        println!("{sep}");
        return;
    }
    for entry in &detail.analyses {
        let a = &entry.analysis;
        println!(
            " Analysis #{}  {}  score {:.1}  ({} issues)",
            a.id,
            a.created_at.format("%Y-%m-%d %H:%M:%S"),
            a.score,
            entry.issues.len()
        );
        for issue in &entry.issues {
            println!(
                "   {:>6}  {:<8}  {}  {}",
                issue.id,
                issue.status.as_str(),
                issue.issue_type,
                truncate(&issue.description, DESCRIPTION_WIDTH)
            );
        }
    }
    println!("{sep}");
}
