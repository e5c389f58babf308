//! Row hashing for exact-match deduplication.
//!
//! Each cell is fed to SHA-256 behind its byte length, so the digest is
//! sensitive to cell boundaries as well as content: `["a,b"]` and
//! `["a", "b"]` hash differently even though they would join to the same
//! string.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest identifying a row's exact cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowDigest([u8; 32]);

impl fmt::Display for RowDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Row hasher for deduplication.
///
/// # Example
///
/// ```rust
/// use csv_dedup::services::deduplication::RowHasher;
///
/// let a = RowHasher::digest(["1", "alice"]);
/// let b = RowHasher::digest(vec!["1".to_string(), "alice".to_string()]);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string().len(), 64);
/// ```
pub struct RowHasher;

impl RowHasher {
    /// Computes the digest of a row.
    #[must_use]
    pub fn digest<I, S>(cells: I) -> RowDigest
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hasher = Sha256::new();
        for cell in cells {
            let cell = cell.as_ref();
            hasher.update((cell.len() as u64).to_le_bytes());
            hasher.update(cell.as_bytes());
        }
        RowDigest(hasher.finalize().into())
    }
}
