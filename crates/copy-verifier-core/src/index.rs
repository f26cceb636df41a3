use crate::hasher::HashAlgorithm;
use crate::identity::{self, IdentityKey};
use crate::issue::ScanIssue;
use crate::scanner;
use ahash::AHashMap;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// How a tree is walked and how each file's identity key is derived.
/// The same options must be used for both sides of an audit.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub follow_symlinks: bool,
    pub use_names: bool,
    pub algorithm: HashAlgorithm,
    pub ignore_patterns: Vec<Pattern>,
}

/// Identity key → representative path for one directory tree.
///
/// When two files in the same tree share a key (byte-identical content), the one
/// visited last wins. Traversal is sorted by file name, so that is the
/// lexicographically last path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeIndex {
    root: PathBuf,
    entries: AHashMap<IdentityKey, PathBuf>,
}

impl TreeIndex {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            entries: AHashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Inserts `path` under `key`, returning the path it displaced, if any.
    pub fn insert(&mut self, key: IdentityKey, path: PathBuf) -> Option<PathBuf> {
        self.entries.insert(key, path)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentityKey, &Path)> {
        self.entries.iter().map(|(key, path)| (key, path.as_path()))
    }
}

/// A tree index plus everything that could not be identified while building it.
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub index: TreeIndex,
    pub issues: Vec<ScanIssue>,
}

/// Walks `root` and keys every regular file under it.
///
/// Unreadable files are logged, recorded in `issues` and left out of the index.
/// A missing root gives an empty index plus one `MissingRoot` issue.
pub fn build_tree_index(root: &Path, options: &IndexOptions) -> IndexOutcome {
    let mut issues = Vec::new();
    let files = scanner::collect_files(
        root,
        options.follow_symlinks,
        &options.ignore_patterns,
        &mut issues,
    );

    let mut index = TreeIndex::new(root);
    for file in files {
        match identity::identify(&file.path, &file.rel_path, options.use_names, options.algorithm)
        {
            Ok(key) => {
                trace!("{} -> {}", file.path.display(), key);
                if let Some(previous) = index.insert(key, file.path) {
                    debug!("Key collision in {}, replacing {}", root.display(), previous.display());
                }
            }
            Err(issue) => {
                error!("{}", issue);
                issues.push(issue);
            }
        }
    }

    IndexOutcome { index, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_identical_content_collapses_to_last_path() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.txt"), "same").unwrap();
        fs::write(root.join("b.txt"), "same").unwrap();
        fs::write(root.join("c.txt"), "other").unwrap();

        let outcome = build_tree_index(root, &IndexOptions::default());
        let index = outcome.index;

        assert_eq!(index.len(), 2);
        let key = IdentityKey::new(crate::hasher::hash_bytes(HashAlgorithm::Sha256, b"same"));
        assert_eq!(index.get(&key), Some(root.join("b.txt").as_path()));
    }

    #[test]
    fn test_name_mode_keys_every_relative_path() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "same").unwrap();
        fs::write(root.join("sub/a.txt"), "same").unwrap();

        let options = IndexOptions {
            use_names: true,
            ..Default::default()
        };
        let index = build_tree_index(root, &options).index;

        assert_eq!(index.len(), 2);
        assert!(index.contains_key(&IdentityKey::new("a.txt")));
        assert!(index.contains_key(&IdentityKey::new("sub/a.txt")));
    }

    #[test]
    fn test_missing_root_is_empty_index() {
        let tmp = tempdir().unwrap();
        let outcome = build_tree_index(&tmp.path().join("absent"), &IndexOptions::default());

        assert!(outcome.index.is_empty());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::MissingRoot);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_left_out_of_index() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("readable.txt"), "fine").unwrap();
        let locked = root.join("locked.txt");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&locked).is_ok() {
            // Running with privileges that ignore file modes
            return;
        }

        let outcome = build_tree_index(root, &IndexOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(outcome.index.len(), 1);
        let key = IdentityKey::new(crate::hasher::hash_bytes(HashAlgorithm::Sha256, b"fine"));
        assert_eq!(outcome.index.get(&key), Some(root.join("readable.txt").as_path()));
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::Read);
        assert_eq!(outcome.issues[0].path, locked);
    }

    #[test]
    fn test_index_remembers_root() {
        let tmp = tempdir().unwrap();
        let index = build_tree_index(tmp.path(), &IndexOptions::default()).index;
        assert_eq!(index.root(), tmp.path());
        assert_eq!(index.iter().count(), 0);
    }
}
