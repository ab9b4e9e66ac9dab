use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::models::{LeaderboardEntry, PointLog, User};
use crate::error::Result;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        hashed_password: row.get(2)?,
    })
}

pub fn insert(conn: &Connection, username: &str, hashed_password: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, hashed_password) VALUES (?1, ?2)",
        params![username, hashed_password],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        hashed_password: hashed_password.to_string(),
    })
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, hashed_password FROM users WHERE username = ?1",
            params![username],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn insert_point_log(
    conn: &Connection,
    user_id: i64,
    points: u32,
    issue_id: i64,
) -> Result<PointLog> {
    let awarded_at = Utc::now();
    conn.execute(
        "INSERT INTO point_logs (user_id, points_awarded, issue_id, awarded_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, points, issue_id, awarded_at],
    )?;
    Ok(PointLog {
        id: conn.last_insert_rowid(),
        user_id,
        points_awarded: points,
        issue_id: Some(issue_id),
        awarded_at,
    })
}

pub fn point_logs_for_issue(conn: &Connection, issue_id: i64) -> Result<Vec<PointLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, points_awarded, issue_id, awarded_at
         FROM point_logs WHERE issue_id = ?1 ORDER BY id",
    )?;
    let logs = stmt
        .query_map(params![issue_id], |row| {
            Ok(PointLog {
                id: row.get(0)?,
                user_id: row.get(1)?,
                points_awarded: row.get(2)?,
                issue_id: row.get(3)?,
                awarded_at: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(logs)
}

/// Users with at least one point, highest total first.
pub fn leaderboard(conn: &Connection) -> Result<Vec<LeaderboardEntry>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username, SUM(p.points_awarded) AS total_points
         FROM users u
         JOIN point_logs p ON p.user_id = u.id
         GROUP BY u.id, u.username
         ORDER BY total_points DESC, u.id",
    )?;
    let entries = stmt
        .query_map([], |row| {
            Ok(LeaderboardEntry {
                id: row.get(0)?,
                username: row.get(1)?,
                total_points: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}
