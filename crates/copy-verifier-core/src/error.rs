use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unknown hash algorithm '{0}' (expected sha256, blake3 or xxh64)")]
    UnknownAlgorithm(String),

    #[error("{0}")]
    Other(String),
}
