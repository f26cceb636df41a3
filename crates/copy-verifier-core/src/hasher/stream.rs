use super::HashAlgorithm;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const CHUNK_SIZE: usize = 4096; // 4KB

/// Streams a file through `algorithm` in `CHUNK_SIZE` reads and returns the hex digest.
/// The handle is dropped on every return path, including read errors.
pub fn hash_file(algorithm: HashAlgorithm, file: &Path) -> io::Result<String> {
    let mut f = File::open(file)?;
    let mut hasher = algorithm.hasher();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match f.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finish_hex())
}

pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    let mut hasher = algorithm.hasher();
    hasher.update(data);
    hasher.finish_hex()
}
