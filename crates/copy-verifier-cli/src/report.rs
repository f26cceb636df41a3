use colored::*;
use copy_verifier_core::{AuditReporter, AuditResult};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Per-file failures are already logged by the indexer; this only narrates progress at info.
pub struct CliReporter;

impl AuditReporter for CliReporter {
    fn on_tree_indexed(&self, root: &Path, entries: usize, elapsed: Duration) {
        info!(
            "Indexed {} ({} entries) in {}",
            root.display(),
            entries,
            format!("{:.2}s", elapsed.as_secs_f64()).green(),
        );
    }
}

pub fn render_missing(result: &AuditResult) -> Vec<String> {
    result
        .missing
        .iter()
        .map(|missing| format!("Identifier: {}, Path: {}", missing.key, missing.path.display()))
        .collect()
}

pub fn print_result(result: &AuditResult) {
    if result.missing.is_empty() {
        println!("{}", "No missing files found.".green());
    } else {
        println!("{}", "Missing files found:".red().bold());
        for line in render_missing(result) {
            println!("{}", line);
        }
    }

    if !result.issues.is_empty() {
        eprintln!(
            "{}",
            format!(
                "{} path(s) could not be identified and were left out of the comparison.",
                result.issues.len()
            )
            .yellow()
        );
    }

    info!(
        "{} source entries checked against {} destination entries, {} missing",
        result.stats.source_entries,
        result.stats.destination_entries,
        format!("{}", result.missing.len()).red(),
    );
}

/// With `strict`, any indexing issue gives 2, even when files are also missing.
/// Otherwise 1 when something is missing and 0 when nothing is.
pub fn exit_code(result: &AuditResult, strict: bool) -> u8 {
    if strict && !result.issues.is_empty() {
        2
    } else if !result.missing.is_empty() {
        1
    } else {
        0
    }
}
