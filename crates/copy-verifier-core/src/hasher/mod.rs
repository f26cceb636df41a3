pub mod stream;

use crate::error::Error;
use serde::Deserialize;
use sha2::Digest;
use std::fmt;
use std::hash::Hasher as _;
use std::str::FromStr;
use twox_hash::XxHash64;

pub use stream::{hash_bytes, hash_file, CHUNK_SIZE};

/// Content digest used to build identity keys in content mode.
///
/// SHA-256 is the default. The others trade collision resistance for speed
/// and only make sense when both sides of an audit are indexed with the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
    Xxh64,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Xxh64 => "xxh64",
        }
    }

    /// A fresh incremental accumulator for this algorithm.
    pub fn hasher(&self) -> Box<dyn StreamingHasher> {
        match self {
            HashAlgorithm::Sha256 => Box::new(sha2::Sha256::new()),
            HashAlgorithm::Blake3 => Box::new(blake3::Hasher::new()),
            HashAlgorithm::Xxh64 => Box::new(XxHash64::with_seed(0)),
        }
    }

    /// Hex digest of zero bytes, the prefix shared by every empty-file key.
    pub fn empty_digest(&self) -> String {
        hash_bytes(*self, &[])
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            "xxh64" | "xxhash64" => Ok(HashAlgorithm::Xxh64),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Incremental digest fed chunk by chunk, finalized once to lowercase hex.
pub trait StreamingHasher {
    fn update(&mut self, data: &[u8]);
    fn finish_hex(self: Box<Self>) -> String;
}

impl StreamingHasher for sha2::Sha256 {
    fn update(&mut self, data: &[u8]) {
        Digest::update(self, data);
    }

    fn finish_hex(self: Box<Self>) -> String {
        hex::encode(Digest::finalize(*self))
    }
}

impl StreamingHasher for blake3::Hasher {
    fn update(&mut self, data: &[u8]) {
        blake3::Hasher::update(self, data);
    }

    fn finish_hex(self: Box<Self>) -> String {
        self.finalize().to_hex().to_string()
    }
}

impl StreamingHasher for XxHash64 {
    fn update(&mut self, data: &[u8]) {
        self.write(data);
    }

    fn finish_hex(self: Box<Self>) -> String {
        format!("{:016x}", self.finish())
    }
}
