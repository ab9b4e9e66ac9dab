use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;

fn py_filter() -> SourceFilter {
    SourceFilter::new("py", &["venv".to_string()])
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "x = 1\n").unwrap();
}

fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn excludes_hidden_and_skip_dirs() {
    let f = py_filter();
    assert!(f.excludes_dir(".git"));
    assert!(f.excludes_dir(".tox"));
    assert!(f.excludes_dir("venv"));
    assert!(!f.excludes_dir("src"));
    assert!(!f.excludes_dir("venv2"));
}

#[test]
fn matches_extension_exactly() {
    let f = py_filter();
    assert!(f.matches_file(Path::new("pkg/mod.py")));
    assert!(!f.matches_file(Path::new("pkg/mod.pyc")));
    assert!(!f.matches_file(Path::new("README.md")));
    assert!(!f.matches_file(Path::new("Makefile")));
}

#[test]
fn collects_nested_sources_sorted() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "setup.py");
    touch(dir.path(), "pkg/b.py");
    touch(dir.path(), "pkg/a.py");
    touch(dir.path(), "pkg/data.json");

    let files = source_files(dir.path(), &py_filter());
    assert_eq!(
        relative(dir.path(), &files),
        vec!["pkg/a.py", "pkg/b.py", "setup.py"]
    );
}

#[test]
fn skips_hidden_and_venv_trees() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "app.py");
    touch(dir.path(), ".git/hooks/hook.py");
    touch(dir.path(), ".venv/lib/site.py");
    touch(dir.path(), "venv/lib/site.py");
    touch(dir.path(), "nested/venv/x.py");

    let files = source_files(dir.path(), &py_filter());
    assert_eq!(relative(dir.path(), &files), vec!["app.py"]);
}

#[test]
fn gitignore_does_not_hide_sources() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "generated/out.py");
    fs::write(dir.path().join(".gitignore"), "generated/\n").unwrap();

    let files = source_files(dir.path(), &py_filter());
    assert_eq!(relative(dir.path(), &files), vec!["generated/out.py"]);
}

#[test]
fn hidden_root_is_still_walked() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".tmpclone");
    touch(&root, "main.py");

    let files = source_files(&root, &py_filter());
    assert_eq!(files.len(), 1);
}

#[test]
fn empty_tree_yields_nothing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "README.md");
    assert!(source_files(dir.path(), &py_filter()).is_empty());
}

#[test]
fn other_extension() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.rb");
    touch(dir.path(), "b.py");
    let f = SourceFilter::new("rb", &[]);
    assert_eq!(relative(dir.path(), &source_files(dir.path(), &f)), vec!["a.rb"]);
}
