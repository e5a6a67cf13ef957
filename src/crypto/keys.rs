//! Key derivation from the shared secret.
//!
//! The derived key is the MD5 digest of the secret's UTF-8 bytes.  There
//! is no salt and no work factor: the same secret always yields the same
//! 16-byte key, which is what lets a sender and a receiver that only share
//! the secret string produce and read each other's tokens.

use md5::{Digest, Md5};
use zeroize::Zeroize;

/// Length of the derived key in bytes (128 bits, two-key Triple-DES).
pub const KEY_LEN: usize = 16;

/// A 16-byte key derived from a shared secret.
///
/// The bytes are zeroed when the key is dropped.  Keys are cheap to
/// derive, so callers derive one per operation instead of caching it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to key the block cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive the cipher key for `secret`.
pub fn derive_key(secret: &str) -> DerivedKey {
    let digest = Md5::digest(secret.as_bytes());
    DerivedKey::new(digest.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn derive_key_is_md5_of_secret() {
        assert_eq!(
            hex(derive_key("k1").as_bytes()),
            "b637b17af08aced8850c18cccde915da"
        );
        assert_eq!(
            hex(derive_key("").as_bytes()),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn derive_key_is_deterministic() {
        let a = derive_key("shared-secret");
        let b = derive_key("shared-secret");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_secrets_give_different_keys() {
        let a = derive_key("secret-one");
        let b = derive_key("secret-two");
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn debug_does_not_print_key_bytes() {
        let key = derive_key("k1");
        assert_eq!(format!("{key:?}"), "DerivedKey(..)");
    }
}
