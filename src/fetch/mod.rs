//! Repository fetching.
//!
//! A [`Workspace`] owns the temporary directory a repository is cloned
//! into; it is removed when the workspace is released or dropped, so every
//! exit path of an analysis run leaves nothing behind on disk.

use std::path::Path;

use git2::FetchOptions;
use git2::build::RepoBuilder;
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Source of repository contents. The production implementation clones
/// with git; tests substitute their own.
pub trait Fetcher {
    /// Materialize `url` into the (existing, empty) directory `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Shallow git clone through libgit2.
pub struct GitFetcher {
    depth: i32,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self { depth: 1 }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut fetch_opts = FetchOptions::new();
        fetch_opts.depth(self.depth);

        debug!(url, dest = %dest.display(), depth = self.depth, "cloning");
        RepoBuilder::new()
            .fetch_options(fetch_opts)
            .clone(url, dest)
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                reason: e.message().to_string(),
            })?;
        Ok(())
    }
}

/// Ephemeral directory holding one clone.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("debtquest-").tempdir()?;
        debug!(path = %dir.path().display(), "workspace created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory now, logging instead of failing: a cleanup
    /// problem must never mask the outcome of the run.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(path = %path.display(), "workspace removed"),
            Err(err) => warn!(path = %path.display(), "failed to remove workspace: {err}"),
        }
    }
}

/// Display name of a project: the last path segment of its URL, without
/// a trailing `.git`.
pub fn project_name(repo_url: &str) -> String {
    let trimmed = repo_url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
