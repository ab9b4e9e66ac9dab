use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::config::AnalysisConfig;

/// Which files of a cloned tree are handed to the linters.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    extension: String,
    skip_dirs: Vec<String>,
}

impl SourceFilter {
    pub fn new(extension: &str, skip_dirs: &[String]) -> Self {
        Self {
            extension: extension.to_string(),
            skip_dirs: skip_dirs.to_vec(),
        }
    }

    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self::new(&cfg.source_extension, &cfg.skip_dirs)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Hidden directories and the configured skip list are never entered.
    pub fn excludes_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.skip_dirs.iter().any(|d| d == name)
    }

    pub fn matches_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension)
    }
}

/// Build a walker over `root` that ignores no files by ignore-file rules
/// (`.gitignore` is not consulted) but prunes excluded directories.
/// The root itself is always entered, even when its name is hidden
/// (temporary directories usually are).
pub fn walk(root: &Path, filter: &SourceFilter) -> ignore::Walk {
    let filter = filter.clone();
    WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
            {
                return !filter.excludes_dir(name);
            }
            true
        })
        .build()
}

/// Collect every matching source file under `root`, sorted by path.
pub fn source_files(root: &Path, filter: &SourceFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walk(root, filter) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_some_and(|ft| ft.is_file()) && filter.matches_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
