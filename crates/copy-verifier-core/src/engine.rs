use crate::identity::IdentityKey;
use crate::index::{build_tree_index, IndexOptions, IndexOutcome, TreeIndex};
use crate::issue::ScanIssue;
use crate::reporter::{AuditReporter, SilentReporter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A source file whose identity key is in none of the destination indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    pub path: PathBuf,
    pub key: IdentityKey,
    pub source_root: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct AuditStats {
    pub source_trees: usize,
    pub destination_trees: usize,
    pub source_entries: usize,
    pub destination_entries: usize,
    pub index_duration: Duration,
    pub diff_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct AuditResult {
    /// Grouped by source directory in the order given, sorted by path within a group.
    pub missing: Vec<MissingFile>,
    /// Files and roots that could not be identified, in indexing order.
    pub issues: Vec<ScanIssue>,
    pub stats: AuditStats,
}

impl AuditResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct AuditEngine {
    options: IndexOptions,
    parallel: bool,
}

impl AuditEngine {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            parallel: false,
        }
    }

    /// Index directories on the rayon pool. Each tree is still built in isolation
    /// and results are merged in input order once every build has finished.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Run the audit:
    /// 1. Index every source and destination tree independently
    /// 2. Report each source entry whose key is absent from the union of destination indexes
    ///
    /// Empty input lists are not an error: no sources means nothing is missing,
    /// no destinations means everything is.
    pub fn audit<P>(
        &self,
        sources: &[P],
        destinations: &[P],
        reporter: &dyn AuditReporter,
    ) -> AuditResult
    where
        P: AsRef<Path> + Sync,
    {
        info!(
            "Indexing {} source and {} destination directories...",
            sources.len(),
            destinations.len()
        );
        let index_start = Instant::now();
        let source_outcomes = self.index_all(sources, reporter);
        let destination_outcomes = self.index_all(destinations, reporter);
        let index_duration = index_start.elapsed();

        let mut issues = Vec::new();
        let source_indexes = collect_indexes(source_outcomes, &mut issues, reporter);
        let destination_indexes = collect_indexes(destination_outcomes, &mut issues, reporter);

        let diff_start = Instant::now();
        let missing = missing_from(&source_indexes, &destination_indexes);
        let diff_duration = diff_start.elapsed();

        let stats = AuditStats {
            source_trees: source_indexes.len(),
            destination_trees: destination_indexes.len(),
            source_entries: source_indexes.iter().map(TreeIndex::len).sum(),
            destination_entries: destination_indexes.iter().map(TreeIndex::len).sum(),
            index_duration,
            diff_duration,
        };
        debug!(
            "Audit completed: {} source entries, {} destination entries, {} missing, {} issues in {:.2}s",
            stats.source_entries,
            stats.destination_entries,
            missing.len(),
            issues.len(),
            (index_duration + diff_duration).as_secs_f64(),
        );

        AuditResult {
            missing,
            issues,
            stats,
        }
    }

    fn index_all<P>(&self, roots: &[P], reporter: &dyn AuditReporter) -> Vec<IndexOutcome>
    where
        P: AsRef<Path> + Sync,
    {
        let build = |root: &P| {
            let root = root.as_ref();
            let start = Instant::now();
            let outcome = build_tree_index(root, &self.options);
            let elapsed = start.elapsed();
            debug!(
                "Indexed {} in {:.2}s, {} entries, {} issues",
                root.display(),
                elapsed.as_secs_f64(),
                outcome.index.len(),
                outcome.issues.len(),
            );
            reporter.on_tree_indexed(root, outcome.index.len(), elapsed);
            outcome
        };

        if self.parallel {
            roots.par_iter().map(&build).collect()
        } else {
            roots.iter().map(&build).collect()
        }
    }
}

fn collect_indexes(
    outcomes: Vec<IndexOutcome>,
    issues: &mut Vec<ScanIssue>,
    reporter: &dyn AuditReporter,
) -> Vec<TreeIndex> {
    outcomes
        .into_iter()
        .map(|outcome| {
            for issue in &outcome.issues {
                reporter.on_issue(issue);
            }
            issues.extend(outcome.issues);
            outcome.index
        })
        .collect()
}

/// Set difference of source indexes against the union of destination indexes.
pub fn missing_from(sources: &[TreeIndex], destinations: &[TreeIndex]) -> Vec<MissingFile> {
    let mut missing = Vec::new();

    for source in sources {
        let mut group: Vec<MissingFile> = source
            .iter()
            .filter(|(key, _)| !destinations.iter().any(|dest| dest.contains_key(key)))
            .map(|(key, path)| MissingFile {
                path: path.to_path_buf(),
                key: key.clone(),
                source_root: source.root().to_path_buf(),
            })
            .collect();
        group.sort_by(|a, b| a.path.cmp(&b.path));
        missing.extend(group);
    }

    missing
}

/// One-shot audit with default sequential indexing and no reporter.
pub fn find_missing_files<P>(sources: &[P], destinations: &[P], options: &IndexOptions) -> AuditResult
where
    P: AsRef<Path> + Sync,
{
    AuditEngine::new(options.clone()).audit(sources, destinations, &SilentReporter)
}
