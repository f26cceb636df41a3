use crate::identity::relative_key;
use crate::issue::{IssueKind, ScanIssue};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, trace, warn};
use walkdir::WalkDir;

/// A regular file found under a tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub rel_path: PathBuf,
}

/// Top-down traversal of `root`, sorted by file name at every level.
///
/// Symlinks are skipped outright unless `follow_symlinks` is set, in which case
/// linked files are indexed and linked directories descended into. Entries whose
/// root-relative path matches an ignore pattern are pruned. Anything the walker
/// cannot read is pushed onto `issues` and the walk carries on.
pub fn collect_files(
    root: &Path,
    follow_symlinks: bool,
    ignore_patterns: &[Pattern],
    issues: &mut Vec<ScanIssue>,
) -> Vec<FileEntry> {
    if !root.is_dir() {
        let reason = match fs::metadata(root) {
            Ok(_) => "not a directory".to_string(),
            Err(e) => e.to_string(),
        };
        warn!("Directory {} is unavailable: {}", root.display(), reason);
        issues.push(ScanIssue::new(root, IssueKind::MissingRoot, reason));
        return Vec::new();
    }

    let walker = WalkDir::new(root)
        .follow_links(follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(root, entry.path(), ignore_patterns));

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                error!("Error reading entry in directory {}: {}", root.display(), err);
                issues.push(ScanIssue::new(&path, IssueKind::Traversal, err));
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            trace!("Skipping symlink {}", entry.path().display());
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        files.push(FileEntry {
            path: entry.into_path(),
            rel_path,
        });
    }

    files
}

fn is_ignored(root: &Path, path: &Path, ignore_patterns: &[Pattern]) -> bool {
    if ignore_patterns.is_empty() {
        return false;
    }
    let rel = relative_key(path.strip_prefix(root).unwrap_or(path));
    ignore_patterns.iter().any(|pattern| pattern.matches(&rel))
}
