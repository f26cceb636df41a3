pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod identity;
pub mod index;
pub mod issue;
pub mod reporter;
pub mod scanner;

pub use crate::config::AppConfig;
pub use crate::engine::{
    find_missing_files, missing_from, AuditEngine, AuditResult, AuditStats, MissingFile,
};
pub use crate::error::Error;
pub use crate::hasher::HashAlgorithm;
pub use crate::identity::IdentityKey;
pub use crate::index::{build_tree_index, IndexOptions, IndexOutcome, TreeIndex};
pub use crate::issue::{IssueKind, ScanIssue};
pub use crate::reporter::{AuditReporter, SilentReporter};
