//! SHA-256 content digests of module archives.
//!
//! The digest is computed by streaming the archive through the hasher, so the
//! archive never has to be held in memory as a whole.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;

/// Length in bytes of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// A raw SHA-256 digest.
///
/// # Examples
///
/// ```
/// use brewgo::digest::Sha256Digest;
///
/// let digest = Sha256Digest::of_bytes(b"hello");
/// assert_eq!(
///     digest.to_hex(),
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; DIGEST_LEN]);

impl Sha256Digest {
    /// Hash an in-memory byte slice.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Hash everything `reader` yields, returning the digest and byte count.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn of_reader(reader: &mut dyn Read) -> std::io::Result<(Self, u64)> {
        let mut hasher = Sha256::new();
        let copied = std::io::copy(reader, &mut hasher)?;
        Ok((Self(hasher.finalize().into()), copied))
    }

    /// Return the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Return the lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl From<[u8; DIGEST_LEN]> for Sha256Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}
