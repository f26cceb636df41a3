use std::fmt;
use std::path::{Path, PathBuf};

/// What went wrong while indexing. None of these abort a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The tree root does not exist or is not a directory.
    MissingRoot,
    /// The walker could not read a directory entry (permissions, symlink loop, dangling link).
    Traversal,
    /// The file was found but its size could not be determined.
    Metadata,
    /// The file could not be opened or read for hashing.
    Read,
}

/// A file or directory that could not be identified, excluded from its tree index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub kind: IssueKind,
    pub message: String,
}

impl ScanIssue {
    pub fn new(path: &Path, kind: IssueKind, message: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::MissingRoot => {
                write!(f, "Directory {} is unavailable: {}", self.path.display(), self.message)
            }
            IssueKind::Traversal => {
                write!(f, "Error walking {}: {}", self.path.display(), self.message)
            }
            IssueKind::Metadata => write!(
                f,
                "Error getting metadata for {}: {}",
                self.path.display(),
                self.message
            ),
            IssueKind::Read => {
                write!(f, "Error processing file {}: {}", self.path.display(), self.message)
            }
        }
    }
}
