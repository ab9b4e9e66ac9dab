use super::*;
use crate::db::projects;
use crate::gamify::catalog::seed_badges;
use crate::gamify::rules::{FIRST_FIX, FIVE_PYLINT_FIXES, TEN_FIXES};

struct Fixture {
    store: Store,
    user: User,
    analysis_id: i64,
}

fn fixture() -> Fixture {
    let store = Store::open_in_memory().unwrap();
    seed_badges(store.conn()).unwrap();
    let user = users::insert(store.conn(), "ada", "not-a-real-hash").unwrap();
    let project = projects::get_or_create(store.conn(), "https://example.com/ada/app").unwrap();
    let analysis = projects::insert_analysis(store.conn(), project.id, 90.0).unwrap();
    Fixture {
        store,
        user,
        analysis_id: analysis.id,
    }
}

impl Fixture {
    fn issue(&self, issue_type: &str) -> i64 {
        issues::insert(self.store.conn(), self.analysis_id, issue_type, "a.py:1: x").unwrap()
    }

    fn resolve_many(&mut self, issue_type: &str, n: usize) {
        for _ in 0..n {
            let id = self.issue(issue_type);
            let user = self.user.clone();
            resolve_issue(&mut self.store, id, &user).unwrap();
        }
    }

    fn badge_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = badges::for_user(self.store.conn(), self.user.id)
            .unwrap()
            .into_iter()
            .map(|b| b.badge.badge_key)
            .collect();
        keys.sort();
        keys
    }
}

#[test]
fn line_too_long_pays_one_point() {
    let mut fx = fixture();
    let id = fx.issue("Pylint (line-too-long)");
    let user = fx.user.clone();
    let res = resolve_issue(&mut fx.store, id, &user).unwrap();
    assert_eq!(res.points, 1);
    assert_eq!(res.message, format!("Issue {id} resolved! You earned 1 points."));
}

#[test]
fn pylint_and_flake8_points() {
    let mut fx = fixture();
    let pylint = fx.issue("Pylint (unused-import)");
    let flake8 = fx.issue("Flake8");
    let other = fx.issue("Mypy");
    let user = fx.user.clone();
    assert_eq!(resolve_issue(&mut fx.store, pylint, &user).unwrap().points, 5);
    assert_eq!(resolve_issue(&mut fx.store, flake8, &user).unwrap().points, 3);
    assert_eq!(resolve_issue(&mut fx.store, other, &user).unwrap().points, 1);

    let board = users::leaderboard(fx.store.conn()).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].total_points, 9);
}

#[test]
fn resolution_records_resolver() {
    let mut fx = fixture();
    let id = fx.issue("Flake8");
    let user = fx.user.clone();
    resolve_issue(&mut fx.store, id, &user).unwrap();
    let issue = issues::find(fx.store.conn(), id).unwrap().unwrap();
    assert_eq!(issue.status, IssueStatus::Resolved);
    assert_eq!(issue.resolver_id, Some(user.id));
}

#[test]
fn resolving_twice_is_rejected_and_pays_once() {
    let mut fx = fixture();
    let id = fx.issue("Flake8");
    let user = fx.user.clone();
    resolve_issue(&mut fx.store, id, &user).unwrap();

    let err = resolve_issue(&mut fx.store, id, &user).unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
    assert_eq!(users::point_logs_for_issue(fx.store.conn(), id).unwrap().len(), 1);
}

#[test]
fn unknown_issue_is_not_found() {
    let mut fx = fixture();
    let user = fx.user.clone();
    let err = resolve_issue(&mut fx.store, 999, &user).unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "issue", .. }));
}

#[test]
fn first_fix_unlocks_on_first_resolution() {
    let mut fx = fixture();
    assert!(check_and_award_badges(fx.store.conn(), fx.user.id).unwrap().is_empty());

    let id = fx.issue("Flake8");
    let user = fx.user.clone();
    let res = resolve_issue(&mut fx.store, id, &user).unwrap();
    let keys: Vec<&str> = res.new_badges.iter().map(|b| b.badge_key.as_str()).collect();
    assert_eq!(keys, vec![FIRST_FIX]);
}

#[test]
fn ten_fixes_needs_ten() {
    let mut fx = fixture();
    fx.resolve_many("Flake8", 9);
    assert_eq!(fx.badge_keys(), vec![FIRST_FIX.to_string()]);

    fx.resolve_many("Flake8", 1);
    assert_eq!(
        fx.badge_keys(),
        vec![FIRST_FIX.to_string(), TEN_FIXES.to_string()]
    );
}

#[test]
fn five_pylint_fixes_counts_pylint_only() {
    let mut fx = fixture();
    fx.resolve_many("Flake8", 4);
    fx.resolve_many("Pylint (unused-variable)", 4);
    assert!(!fx.badge_keys().contains(&FIVE_PYLINT_FIXES.to_string()));

    fx.resolve_many("Pylint (line-too-long)", 1);
    assert!(fx.badge_keys().contains(&FIVE_PYLINT_FIXES.to_string()));
}

#[test]
fn pylint_match_is_case_sensitive() {
    let mut fx = fixture();
    fx.resolve_many("pylint (lowercase)", 5);
    assert!(!fx.badge_keys().contains(&FIVE_PYLINT_FIXES.to_string()));
}

#[test]
fn badges_are_never_duplicated() {
    let mut fx = fixture();
    fx.resolve_many("Flake8", 3);
    for _ in 0..3 {
        assert!(check_and_award_badges(fx.store.conn(), fx.user.id).unwrap().is_empty());
    }
    assert_eq!(badges::for_user(fx.store.conn(), fx.user.id).unwrap().len(), 1);
}

#[test]
fn badge_missing_from_catalog_is_skipped() {
    let store = Store::open_in_memory().unwrap();
    let user = users::insert(store.conn(), "bob", "not-a-real-hash").unwrap();
    let project = projects::get_or_create(store.conn(), "https://example.com/bob/app").unwrap();
    let analysis = projects::insert_analysis(store.conn(), project.id, 50.0).unwrap();
    let id = issues::insert(store.conn(), analysis.id, "Flake8", "a.py:1: x").unwrap();
    issues::mark_resolved(store.conn(), id, user.id).unwrap();

    // no catalog seeded
    assert!(check_and_award_badges(store.conn(), user.id).unwrap().is_empty());
    assert!(badges::for_user(store.conn(), user.id).unwrap().is_empty());
}

#[test]
fn award_points_logs_against_issue() {
    let fx = fixture();
    let id = fx.issue("Pylint (missing-docstring)");
    issues::mark_resolved(fx.store.conn(), id, fx.user.id).unwrap();
    let issue = issues::find(fx.store.conn(), id).unwrap().unwrap();

    let award = award_points_for_issue(fx.store.conn(), &issue, &fx.user).unwrap();
    assert_eq!(award.points, 5);
    let logs = users::point_logs_for_issue(fx.store.conn(), id).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].points_awarded, 5);
    assert_eq!(logs[0].user_id, fx.user.id);
}
