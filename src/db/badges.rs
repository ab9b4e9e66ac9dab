use std::collections::HashSet;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::models::{AwardedBadge, Badge};
use crate::error::Result;

fn badge_from_row(row: &Row<'_>) -> rusqlite::Result<Badge> {
    Ok(Badge {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        badge_key: row.get(3)?,
    })
}

pub fn find_by_key(conn: &Connection, key: &str) -> Result<Option<Badge>> {
    let badge = conn
        .query_row(
            "SELECT id, name, description, badge_key FROM badges WHERE badge_key = ?1",
            params![key],
            badge_from_row,
        )
        .optional()?;
    Ok(badge)
}

pub fn insert(conn: &Connection, name: &str, description: &str, key: &str) -> Result<Badge> {
    conn.execute(
        "INSERT INTO badges (name, description, badge_key) VALUES (?1, ?2, ?3)",
        params![name, description, key],
    )?;
    Ok(Badge {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        badge_key: key.to_string(),
    })
}

pub fn count(conn: &Connection) -> Result<usize> {
    Ok(conn.query_row("SELECT COUNT(*) FROM badges", [], |row| row.get(0))?)
}

/// Keys of every badge the user already holds.
pub fn keys_for_user(conn: &Connection, user_id: i64) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare(
        "SELECT b.badge_key FROM user_badges ub
         JOIN badges b ON b.id = ub.badge_id
         WHERE ub.user_id = ?1",
    )?;
    let keys = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
    Ok(keys)
}

pub fn award(conn: &Connection, user_id: i64, badge_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO user_badges (user_id, badge_id, awarded_at) VALUES (?1, ?2, ?3)",
        params![user_id, badge_id, Utc::now()],
    )?;
    Ok(())
}

/// Badges held by a user, oldest award first.
pub fn for_user(conn: &Connection, user_id: i64) -> Result<Vec<AwardedBadge>> {
    let mut stmt = conn.prepare(
        "SELECT ub.awarded_at, b.id, b.name, b.description, b.badge_key
         FROM user_badges ub
         JOIN badges b ON b.id = ub.badge_id
         WHERE ub.user_id = ?1
         ORDER BY ub.awarded_at, ub.id",
    )?;
    let badges = stmt
        .query_map(params![user_id], |row| {
            Ok(AwardedBadge {
                awarded_at: row.get(0)?,
                badge: Badge {
                    id: row.get(1)?,
                    name: row.get(2)?,
                    description: row.get(3)?,
                    badge_key: row.get(4)?,
                },
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(badges)
}
