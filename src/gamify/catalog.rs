use rusqlite::Connection;
use tracing::debug;

use super::rules::{FIRST_FIX, FIVE_PYLINT_FIXES, TEN_FIXES};
use crate::db::badges;
use crate::error::Result;

pub struct BadgeSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Every badge that can be earned.
pub const CATALOG: &[BadgeSpec] = &[
    BadgeSpec {
        key: FIRST_FIX,
        name: "First Fix",
        description: "You resolved your very first issue!",
    },
    BadgeSpec {
        key: TEN_FIXES,
        name: "Bug Squasher",
        description: "You resolved 10 issues!",
    },
    BadgeSpec {
        key: FIVE_PYLINT_FIXES,
        name: "Code Cleaner",
        description: "You resolved 5 Pylint issues!",
    },
];

/// Insert catalog badges whose key is not present yet. Safe to run on
/// every start; returns how many rows were added.
pub fn seed_badges(conn: &Connection) -> Result<usize> {
    let mut added = 0;
    for entry in CATALOG {
        if badges::find_by_key(conn, entry.key)?.is_none() {
            badges::insert(conn, entry.name, entry.description, entry.key)?;
            added += 1;
        }
    }
    debug!(added, total = badges::count(conn)?, "badge catalog seeded");
    Ok(added)
}
