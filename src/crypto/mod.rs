//! Cipher codec for sealed parameters.
//!
//! This module provides:
//! - MD5-based key derivation from the shared secret (`keys`)
//! - Triple-DES ECB encryption and base64 tokens (`encryption`)

pub mod encryption;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key};
pub use encryption::{decrypt, encrypt, seal_pairs};
pub use keys::{derive_key, DerivedKey};
