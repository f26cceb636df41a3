use crate::error::Error;
use crate::hasher::HashAlgorithm;
use crate::index::IndexOptions;
use config::{Config, Environment, File as ConfigFile};
use glob::Pattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "CopyVerifier";
pub const ENV_PREFIX: &str = "COPY_VERIFIER";
pub const LIST_SEPARATOR: &str = ",";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: Vec<PathBuf>,
    pub destinations: Vec<PathBuf>,
    pub follow_symlinks: bool,
    pub use_names: bool,
    pub hash_algorithm: HashAlgorithm,
    pub parallel: bool,
    pub ignore_patterns: Vec<String>,
}

impl AppConfig {
    /// Compiles the glob list and bundles the per-tree settings.
    pub fn index_options(&self) -> Result<IndexOptions, Error> {
        let ignore_patterns = self
            .ignore_patterns
            .iter()
            .map(|glob| Pattern::new(glob))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IndexOptions {
            follow_symlinks: self.follow_symlinks,
            use_names: self.use_names,
            algorithm: self.hash_algorithm,
            ignore_patterns,
        })
    }
}

/// Loads `CopyVerifier.toml` from the working directory when present, or `path` when
/// given (then it must exist), overlaid with `COPY_VERIFIER_*` environment variables.
pub fn load_configuration(path: Option<&Path>) -> Result<AppConfig, Error> {
    build_configuration(path, environment())
}

/// `COPY_VERIFIER_*` variables. The list settings take comma-separated values,
/// e.g. `COPY_VERIFIER_DESTINATIONS=/mnt/a,/mnt/b`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(LIST_SEPARATOR)
        .with_list_parse_key("sources")
        .with_list_parse_key("destinations")
        .with_list_parse_key("ignore_patterns")
}

fn build_configuration(path: Option<&Path>, environment: Environment) -> Result<AppConfig, Error> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = Config::builder()
        .add_source(file_source)
        .add_source(environment)
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}
