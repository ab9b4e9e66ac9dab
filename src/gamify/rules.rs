//! Point and badge rules.
//!
//! Point values are an ordered list checked first-match-wins against the
//! issue type label. Badge rules are thresholds over a user's lifetime
//! resolved-issue counts, recomputed from the database every time.

use crate::lint::flake8::FLAKE8;
use crate::lint::pylint::PYLINT;

/// Points awarded when no rule matches.
pub const DEFAULT_POINTS: u32 = 1;

pub struct PointRule {
    pub name: &'static str,
    /// Substring the issue type must contain.
    pub type_contains: &'static str,
    pub points: u32,
}

/// Checked in order; the first matching rule decides.
pub const POINT_RULES: &[PointRule] = &[
    PointRule {
        name: "long line",
        type_contains: "Pylint (line-too-long)",
        points: 1,
    },
    PointRule {
        name: "pylint",
        type_contains: PYLINT,
        points: 5,
    },
    PointRule {
        name: "flake8",
        type_contains: FLAKE8,
        points: 3,
    },
];

/// First rule whose substring occurs in `issue_type`.
pub fn rule_for(issue_type: &str) -> Option<&'static PointRule> {
    POINT_RULES
        .iter()
        .find(|rule| issue_type.contains(rule.type_contains))
}

/// Points for resolving an issue of the given type.
pub fn points_for(issue_type: &str) -> u32 {
    rule_for(issue_type).map_or(DEFAULT_POINTS, |rule| rule.points)
}

/// What a badge threshold is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixCounter {
    /// Every issue the user resolved.
    AllFixes,
    /// Resolved issues whose type label contains the given text.
    TypeContains(&'static str),
}

pub struct BadgeRule {
    pub key: &'static str,
    pub counter: FixCounter,
    pub threshold: usize,
}

pub const FIRST_FIX: &str = "FIRST_FIX";
pub const TEN_FIXES: &str = "TEN_FIXES";
pub const FIVE_PYLINT_FIXES: &str = "FIVE_PYLINT_FIXES";

pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        key: FIRST_FIX,
        counter: FixCounter::AllFixes,
        threshold: 1,
    },
    BadgeRule {
        key: TEN_FIXES,
        counter: FixCounter::AllFixes,
        threshold: 10,
    },
    BadgeRule {
        key: FIVE_PYLINT_FIXES,
        counter: FixCounter::TypeContains(PYLINT),
        threshold: 5,
    },
];
