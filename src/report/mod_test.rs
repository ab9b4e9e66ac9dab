use chrono::{DateTime, TimeZone, Utc};
use rusqlite::params;

use super::*;
use crate::db::models::User;
use crate::db::{issues, projects, users};
use crate::error::Error;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, hour, 0, 0).unwrap()
}

/// Insert an analysis with a fixed timestamp.
fn analysis(store: &Store, project_id: i64, score: f64, when: DateTime<Utc>) -> i64 {
    store
        .conn()
        .execute(
            "INSERT INTO analyses (project_id, score, created_at) VALUES (?1, ?2, ?3)",
            params![project_id, score, when],
        )
        .unwrap();
    store.conn().last_insert_rowid()
}

fn issue(store: &Store, analysis_id: i64, issue_type: &str) -> i64 {
    issues::insert(store.conn(), analysis_id, issue_type, "app.py:1: x").unwrap()
}

fn user(store: &Store) -> User {
    users::insert(store.conn(), "ada", "not-a-real-hash").unwrap()
}

#[test]
fn unknown_project_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let err = generate_project_report(store.conn(), 42).unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "project", .. }));
}

#[test]
fn project_without_issues_reports_zeros() {
    let store = Store::open_in_memory().unwrap();
    let p = projects::get_or_create(store.conn(), "https://example.com/a/clean").unwrap();
    // an analysis with no issues is invisible to the report
    analysis(&store, p.id, 100.0, at(1));

    let report = generate_project_report(store.conn(), p.id).unwrap();
    assert_eq!(report.project_id, p.id);
    assert_eq!(report.project_name, "clean");
    assert_eq!(report.total_analyses, 0);
    assert_eq!(report.total_open_issues, 0);
    assert!(report.score_over_time.is_empty());
    assert!(report.issues_by_type.is_empty());
    assert!(report.issues_by_status.is_empty());
}

#[test]
fn aggregates_across_analyses() {
    let mut store = Store::open_in_memory().unwrap();
    let p = projects::get_or_create(store.conn(), "https://example.com/a/app").unwrap();
    let later = analysis(&store, p.id, 97.0, at(9));
    let earlier = analysis(&store, p.id, 95.5, at(8));
    issue(&store, earlier, "Flake8");
    issue(&store, earlier, "Flake8");
    issue(&store, earlier, "Pylint (unused-import)");
    let fixed = issue(&store, later, "Pylint (unused-import)");
    issue(&store, later, "Flake8");

    let u = user(&store);
    crate::gamify::resolve_issue(&mut store, fixed, &u).unwrap();

    let report = generate_project_report(store.conn(), p.id).unwrap();
    assert_eq!(report.total_analyses, 2);
    assert_eq!(report.total_open_issues, 4);

    let series: Vec<(DateTime<Utc>, f64)> = report
        .score_over_time
        .iter()
        .map(|s| (s.date, s.score))
        .collect();
    assert_eq!(series, vec![(at(8), 95.5), (at(9), 97.0)]);

    assert_eq!(
        report.issues_by_type,
        vec![
            CategoryCount {
                category: "Flake8".to_string(),
                value: 3
            },
            CategoryCount {
                category: "Pylint (unused-import)".to_string(),
                value: 2
            },
        ]
    );
    assert_eq!(
        report.issues_by_status,
        vec![
            CategoryCount {
                category: "open".to_string(),
                value: 4
            },
            CategoryCount {
                category: "resolved".to_string(),
                value: 1
            },
        ]
    );
}

#[test]
fn same_timestamp_counts_once() {
    let store = Store::open_in_memory().unwrap();
    let p = projects::get_or_create(store.conn(), "https://example.com/a/twin").unwrap();
    let a = analysis(&store, p.id, 90.0, at(3));
    let b = analysis(&store, p.id, 90.0, at(3));
    issue(&store, a, "Flake8");
    issue(&store, b, "Flake8");

    let report = generate_project_report(store.conn(), p.id).unwrap();
    assert_eq!(report.total_analyses, 1);
    assert_eq!(report.score_over_time.len(), 1);
}

#[test]
fn other_projects_are_excluded() {
    let store = Store::open_in_memory().unwrap();
    let mine = projects::get_or_create(store.conn(), "https://example.com/a/mine").unwrap();
    let theirs = projects::get_or_create(store.conn(), "https://example.com/b/theirs").unwrap();
    let a = analysis(&store, theirs.id, 50.0, at(2));
    issue(&store, a, "Flake8");

    let report = generate_project_report(store.conn(), mine.id).unwrap();
    assert_eq!(report.total_open_issues, 0);
    assert!(report.issues_by_type.is_empty());
}

#[test]
fn count_by_orders_by_count_then_label() {
    let counts = super::builder::count_by(["b", "a", "c", "c", "a"].into_iter());
    let labels: Vec<(&str, usize)> = counts
        .iter()
        .map(|c| (c.category.as_str(), c.value))
        .collect();
    assert_eq!(labels, vec![("a", 2), ("c", 2), ("b", 1)]);
}

#[test]
fn run_prints_every_format() {
    let store = Store::open_in_memory().unwrap();
    let p = projects::get_or_create(store.conn(), "https://example.com/a/app").unwrap();
    let a = analysis(&store, p.id, 99.0, at(5));
    issue(&store, a, "Pylint (missing-docstring)");

    run(&store, p.id, false, false).unwrap();
    run(&store, p.id, false, true).unwrap();
    run(&store, p.id, true, false).unwrap();
}
