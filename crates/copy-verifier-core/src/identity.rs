use crate::hasher::{self, HashAlgorithm};
use crate::issue::{IssueKind, ScanIssue};
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Component, Path};

/// Separator between the empty-content digest and the relative path of a zero-length file.
pub const EMPTY_KEY_SEPARATOR: &str = "-";

/// The unit of comparison between trees: a content digest or a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders a root-relative path with `/` separators so that keys built on
/// different platforms, or from differently spelled roots, compare equal.
///
/// Distinct names always give distinct keys: UTF-8 text is kept as is, a literal
/// backslash is doubled and bytes that are not UTF-8 are written as `\xNN`.
pub fn relative_key(rel_path: &Path) -> String {
    rel_path
        .components()
        .filter_map(|comp| match comp {
            Component::Normal(part) => Some(escape_component(part)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn push_escaped_str(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '\\' {
            out.push_str("\\\\");
        } else {
            out.push(ch);
        }
    }
}

#[cfg(unix)]
fn escape_component(part: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let mut out = String::new();
    let mut rest = part.as_bytes();
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                push_escaped_str(&mut out, text);
                return out;
            }
            Err(err) => {
                let valid = err.valid_up_to();
                if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                    push_escaped_str(&mut out, text);
                }
                let invalid = err.error_len().unwrap_or(rest.len() - valid);
                for byte in &rest[valid..valid + invalid] {
                    out.push_str(&format!("\\x{:02x}", byte));
                }
                rest = &rest[valid + invalid..];
            }
        }
    }
}

#[cfg(windows)]
fn escape_component(part: &OsStr) -> String {
    use std::os::windows::ffi::OsStrExt;

    let mut out = String::new();
    for unit in char::decode_utf16(part.encode_wide()) {
        match unit {
            Ok('\\') => out.push_str("\\\\"),
            Ok(ch) => out.push(ch),
            Err(err) => out.push_str(&format!("\\u{{{:04x}}}", err.unpaired_surrogate())),
        }
    }
    out
}

#[cfg(not(any(unix, windows)))]
fn escape_component(part: &OsStr) -> String {
    let mut out = String::new();
    push_escaped_str(&mut out, &part.to_string_lossy());
    out
}

/// Computes the identity key of one file.
///
/// Name mode never touches the file. Content mode hashes the bytes, except that a
/// zero-length file gets `digest("") + "-" + relative path` so empty files at different
/// locations stay distinct.
pub fn identify(
    path: &Path,
    rel_path: &Path,
    use_names: bool,
    algorithm: HashAlgorithm,
) -> Result<IdentityKey, ScanIssue> {
    if use_names {
        return Ok(IdentityKey(relative_key(rel_path)));
    }

    let metadata =
        fs::metadata(path).map_err(|e| ScanIssue::new(path, IssueKind::Metadata, e))?;
    let digest =
        hasher::hash_file(algorithm, path).map_err(|e| ScanIssue::new(path, IssueKind::Read, e))?;

    if metadata.len() == 0 {
        Ok(IdentityKey(format!(
            "{}{}{}",
            digest,
            EMPTY_KEY_SEPARATOR,
            relative_key(rel_path)
        )))
    } else {
        Ok(IdentityKey(digest))
    }
}
