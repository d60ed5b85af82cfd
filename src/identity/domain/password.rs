//! Stored password hash value type.

use std::fmt;

/// Opaque password hash produced by a hashing adapter.
///
/// The wrapped digest never appears in `Debug` output and the type
/// deliberately implements no serde traits, so hashes cannot leak through
/// logs or serialized payloads.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-computed hash digest.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Returns the hash digest as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
