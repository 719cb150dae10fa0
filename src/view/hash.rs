//! Content-derived resource addresses

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digest bytes kept in a hash (hex length is twice this)
const HASH_BYTES: usize = 6;

/// Short hex address of a style or script body: first 6 bytes of SHA-256.
///
/// Identical content always yields the same hash. Distinct content sharing a
/// hash is detected by the registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceHash(String);

impl ResourceHash {
    pub fn from_content(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest[..HASH_BYTES]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self(hex)
    }

    /// Validate a hash taken from an untrusted request path
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == HASH_BYTES * 2
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
