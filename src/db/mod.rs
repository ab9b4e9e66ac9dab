//! SQLite persistence.
//!
//! One table per entity, foreign keys enforced. Query functions take a
//! plain `&Connection` so the same code runs inside a [`Transaction`]
//! (which derefs to a connection) or directly on the store.

pub mod badges;
pub mod issues;
pub mod models;
pub mod projects;
pub mod users;

use std::fs;
use std::path::Path;

use rusqlite::{Connection, Transaction};
use tracing::debug;

use crate::error::Result;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        repo_url TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS analyses (
        id INTEGER PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        score REAL NOT NULL CHECK (score >= 0 AND score <= 100),
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS issues (
        id INTEGER PRIMARY KEY,
        analysis_id INTEGER NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
        issue_type TEXT NOT NULL,
        description TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'resolved')),
        resolver_id INTEGER REFERENCES users(id),
        CHECK ((status = 'resolved') = (resolver_id IS NOT NULL))
    );

    CREATE TABLE IF NOT EXISTS point_logs (
        id INTEGER PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        points_awarded INTEGER NOT NULL CHECK (points_awarded > 0),
        issue_id INTEGER REFERENCES issues(id) ON DELETE SET NULL,
        awarded_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS badges (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL,
        badge_key TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS user_badges (
        id INTEGER PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        badge_id INTEGER NOT NULL REFERENCES badges(id),
        awarded_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_analyses_project ON analyses(project_id);
    CREATE INDEX IF NOT EXISTS idx_issues_analysis ON issues(analysis_id);
    CREATE INDEX IF NOT EXISTS idx_issues_resolver ON issues(resolver_id);
    CREATE INDEX IF NOT EXISTS idx_point_logs_user ON point_logs(user_id);
    CREATE INDEX IF NOT EXISTS idx_user_badges_user ON user_badges(user_id);
";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening database");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction; it rolls back when dropped without `commit`.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
