use clap::{Args, Parser, Subcommand};
use copy_verifier_core::{AppConfig, HashAlgorithm};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "copy-verifier")]
#[command(
    about = "Checks whether every file from the source directories exists in the destination directories",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (default: ./CopyVerifier.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report source files that have no counterpart in any destination
    Verify(VerifyArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Source directory, may be repeated
    #[arg(short = 's', long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,

    /// Destination directory, may be repeated
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub destinations: Vec<PathBuf>,

    /// Follow symbolic links when scanning files
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Use relative file names instead of checksums for comparison
    #[arg(long)]
    pub use_names: bool,

    /// Checksum algorithm: sha256, blake3 or xxh64
    #[arg(long, value_name = "ALGORITHM")]
    pub algorithm: Option<HashAlgorithm>,

    /// Index directories in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Skip paths matching this glob (relative to each directory), may be repeated
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore_patterns: Vec<String>,

    /// Fail when any directory or file could not be read
    #[arg(long)]
    pub strict: bool,
}

impl VerifyArgs {
    /// Layers command-line values over the loaded configuration.
    /// Directory lists replace the configured ones, switches can only turn things on.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if !self.sources.is_empty() {
            config.sources = self.sources.clone();
        }
        if !self.destinations.is_empty() {
            config.destinations = self.destinations.clone();
        }
        config.follow_symlinks |= self.follow_symlinks;
        config.use_names |= self.use_names;
        config.parallel |= self.parallel;
        if let Some(algorithm) = self.algorithm {
            config.hash_algorithm = algorithm;
        }
        config
            .ignore_patterns
            .extend(self.ignore_patterns.iter().cloned());
    }
}
