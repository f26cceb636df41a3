use crate::issue::ScanIssue;
use std::path::Path;
use std::time::Duration;

/// Hooks for observing an audit as it runs.
///
/// The CLI implements this to log issues as they are found. All methods have
/// default no-op implementations. Indexing may run on several threads, hence `Send + Sync`.
pub trait AuditReporter: Send + Sync {
    fn on_tree_indexed(&self, _root: &Path, _entries: usize, _elapsed: Duration) {}
    fn on_issue(&self, _issue: &ScanIssue) {}
}

/// No-op reporter for library use.
pub struct SilentReporter;

impl AuditReporter for SilentReporter {}
