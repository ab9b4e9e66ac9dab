//! User registration and credential checks.

mod hasher;

pub use hasher::{hash_password, verify_password};

use rusqlite::Connection;
use tracing::info;

use crate::db::models::User;
use crate::db::{Store, users};
use crate::error::{Error, Result};
use crate::report_helpers;

/// Create a user. A taken username is a precondition failure, not a
/// database error.
pub fn register_user(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::Precondition("username must not be empty".to_string()));
    }
    if password.is_empty() {
        return Err(Error::Precondition("password must not be empty".to_string()));
    }
    if users::find_by_username(conn, username)?.is_some() {
        return Err(Error::Precondition("Username already registered".to_string()));
    }
    let hashed = hash_password(password)?;
    let user = users::insert(conn, username, &hashed)?;
    info!(id = user.id, username, "registered user");
    Ok(user)
}

/// Resolve credentials to a user; unknown names and wrong passwords are
/// indistinguishable to the caller.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let user = users::find_by_username(conn, username.trim())?.ok_or(Error::Auth)?;
    if verify_password(password, &user.hashed_password) {
        Ok(user)
    } else {
        Err(Error::Auth)
    }
}

pub fn run_register(store: &Store, username: &str, password: &str, json: bool) -> Result<()> {
    let user = register_user(store.conn(), username, password)?;
    if json {
        report_helpers::print_json_stdout(&user)
    } else {
        println!("Registered user {} (id {}).", user.username, user.id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
