//! Gamification engine: points for resolved issues and badge unlocks.
//!
//! Resolution happens in one transaction: the status flip, the point
//! ledger entry and any new badges commit together or not at all.

pub mod catalog;
mod report;
pub mod rules;

use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::models::{Badge, Issue, IssueStatus, User};
use crate::db::{Store, badges, issues, users};
use crate::error::{Error, Result};
use crate::report_helpers;
use report::{print_badges, print_leaderboard, print_resolution};
use rules::{BADGE_RULES, FixCounter};

/// Outcome of awarding one resolved issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award {
    pub points: u32,
    /// Badges unlocked by this award, in rule order.
    pub new_badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub issue_id: i64,
    pub points: u32,
    pub new_badges: Vec<Badge>,
    pub message: String,
}

/// Log points for `issue` to `user`, then re-evaluate every badge rule.
/// The issue is expected to be already marked resolved by `user`.
pub fn award_points_for_issue(conn: &Connection, issue: &Issue, user: &User) -> Result<Award> {
    let rule = rules::rule_for(&issue.issue_type).map_or("default", |r| r.name);
    let points = rules::points_for(&issue.issue_type);
    if points > 0 {
        users::insert_point_log(conn, user.id, points, issue.id)?;
        info!(issue_id = issue.id, user_id = user.id, points, rule, "points awarded");
    }
    let new_badges = check_and_award_badges(conn, user.id)?;
    Ok(Award { points, new_badges })
}

/// Evaluate all badge rules against fresh counts, awarding each badge
/// at most once per user.
pub fn check_and_award_badges(conn: &Connection, user_id: i64) -> Result<Vec<Badge>> {
    let held = badges::keys_for_user(conn, user_id)?;
    let mut awarded = Vec::new();

    for rule in BADGE_RULES {
        let count = match rule.counter {
            FixCounter::AllFixes => issues::count_resolved_by(conn, user_id, None)?,
            FixCounter::TypeContains(text) => {
                issues::count_resolved_by(conn, user_id, Some(text))?
            }
        };
        if count < rule.threshold || held.contains(rule.key) {
            continue;
        }
        match badges::find_by_key(conn, rule.key)? {
            Some(badge) => {
                badges::award(conn, user_id, badge.id)?;
                info!(user_id, badge = rule.key, count, "badge unlocked");
                awarded.push(badge);
            }
            None => warn!(badge = rule.key, "badge missing from catalog, not awarded"),
        }
    }
    Ok(awarded)
}

/// Mark an open issue resolved by `user` and award points and badges.
pub fn resolve_issue(store: &mut Store, issue_id: i64, user: &User) -> Result<Resolution> {
    let tx = store.transaction()?;

    let issue = issues::find(&tx, issue_id)?.ok_or_else(|| Error::not_found("issue", issue_id))?;
    if issue.status == IssueStatus::Resolved || !issues::mark_resolved(&tx, issue_id, user.id)? {
        return Err(Error::Precondition("Issue is already resolved".to_string()));
    }

    let award = award_points_for_issue(&tx, &issue, user)?;
    tx.commit()?;

    info!(issue_id, user = %user.username, points = award.points, "issue resolved");
    Ok(Resolution {
        issue_id,
        points: award.points,
        message: format!(
            "Issue {issue_id} resolved! You earned {} points.",
            award.points
        ),
        new_badges: award.new_badges,
    })
}

pub fn run_resolve(store: &mut Store, issue_id: i64, user: &User, json: bool) -> Result<()> {
    let resolution = resolve_issue(store, issue_id, user)?;
    if json {
        report_helpers::print_json_stdout(&resolution)
    } else {
        print_resolution(&resolution);
        Ok(())
    }
}

pub fn run_leaderboard(store: &Store, json: bool) -> Result<()> {
    let board = users::leaderboard(store.conn())?;
    if json {
        report_helpers::print_json_stdout(&board)
    } else {
        print_leaderboard(&board);
        Ok(())
    }
}

pub fn run_badges(store: &Store, user: &User, json: bool) -> Result<()> {
    let held = badges::for_user(store.conn(), user.id)?;
    if json {
        report_helpers::print_json_stdout(&held)
    } else {
        print_badges(&user.username, &held);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
