//! Two-key Triple-DES in ECB mode, base64 on the wire.
//!
//! Layout of a token:
//!   base64( 3DES-EDE2-ECB( PKCS#7( utf8(plaintext) ) ) )
//!
//! There is no nonce, IV, version tag or MAC.  Identical plaintext under
//! an identical secret always produces an identical token, and tokens
//! must stay byte-compatible with ones minted by existing senders.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use des::TdesEde2;
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use url::form_urlencoded;

use crate::crypto::keys::derive_key;
use crate::errors::{Result, SealedParamsError};

type EcbEncryptor = ecb::Encryptor<TdesEde2>;
type EcbDecryptor = ecb::Decryptor<TdesEde2>;

/// Triple-DES block size in bytes.
pub const BLOCK_LEN: usize = 8;

/// Encrypt `plaintext` under a key derived from `secret` and return the
/// base64 token.
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String> {
    let key = derive_key(secret);

    let cipher = EcbEncryptor::new_from_slice(key.as_bytes())
        .map_err(|e| SealedParamsError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted payload"
    );

    Ok(BASE64.encode(ciphertext))
}

/// Decrypt a token produced by [`encrypt`].
///
/// Every failure collapses into [`SealedParamsError::DecryptionFailed`]:
/// a wrong secret usually shows up as bad padding, so the cause cannot be
/// told apart reliably and is not reported.
pub fn decrypt(token: &str, secret: &str) -> Result<String> {
    let ciphertext = BASE64.decode(token).map_err(|e| {
        tracing::debug!(error = %e, "token is not valid base64");
        SealedParamsError::DecryptionFailed
    })?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        tracing::debug!(
            ciphertext_len = ciphertext.len(),
            "ciphertext is not a whole number of blocks"
        );
        return Err(SealedParamsError::DecryptionFailed);
    }

    let key = derive_key(secret);
    let cipher = EcbDecryptor::new_from_slice(key.as_bytes())
        .map_err(|_| SealedParamsError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| {
            tracing::debug!("padding check failed after decryption");
            SealedParamsError::DecryptionFailed
        })?;

    String::from_utf8(plaintext).map_err(|_| {
        tracing::debug!("decrypted payload is not valid UTF-8");
        SealedParamsError::DecryptionFailed
    })
}

/// Serialize `pairs` as a query string and encrypt it.
///
/// This is the sending side of the scheme: the result can be placed under
/// the configured parameter name (see [`crate::filter::EncryptedParameters`]).
pub fn seal_pairs<'a, I>(pairs: I, secret: &str) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let plaintext = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    encrypt(&plaintext, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_token() {
        assert_eq!(
            encrypt("number=42&name=Ada", "k1").unwrap(),
            "CeiHZDFTO46bEnLzGdFD6dhv0PpSm6v0"
        );
    }

    #[test]
    fn exact_block_plaintext_gets_a_full_padding_block() {
        let token = encrypt("12345678", "secret").unwrap();
        assert_eq!(token, "LPoUps4SAhkVaDN64HepJg==");
        assert_eq!(BASE64.decode(&token).unwrap().len(), 2 * BLOCK_LEN);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let token = encrypt("", "k1").unwrap();
        assert_eq!(token, "HryY3ftmNfA=");
        assert_eq!(decrypt(&token, "k1").unwrap(), "");
    }

    #[test]
    fn decrypt_rejects_partial_block() {
        let token = BASE64.encode([0u8; 5]);
        assert!(matches!(
            decrypt(&token, "k1"),
            Err(SealedParamsError::DecryptionFailed)
        ));
    }

    #[test]
    fn decrypt_rejects_empty_token() {
        assert!(matches!(
            decrypt("", "k1"),
            Err(SealedParamsError::DecryptionFailed)
        ));
    }

    #[test]
    fn seal_pairs_encodes_reserved_characters() {
        let token = seal_pairs([("q", "a&b=c"), ("name", "Ada Lovelace")], "k1").unwrap();
        assert_eq!(
            decrypt(&token, "k1").unwrap(),
            "q=a%26b%3Dc&name=Ada+Lovelace"
        );
    }
}
