//! Request-side entry points.
//!
//! A transport adapter hands over the raw query string (or the token it
//! already extracted), the shared secret and the fields its handler
//! takes.  A decryption failure fails the whole call; conversion failures
//! come back per field inside [`Bindings`].

use url::form_urlencoded;

use crate::binding::{bind, parse_pairs, Bindings, FieldSpec};
use crate::crypto::decrypt;
use crate::errors::{Result, SealedParamsError};

/// Query parameter that carries the token when none is configured.
pub const DEFAULT_PARAMETER_NAME: &str = "secret";

/// Decrypt `token` and bind its payload against `fields`.
pub fn decrypt_and_bind(token: &str, secret: &str, fields: &[FieldSpec]) -> Result<Bindings> {
    let plaintext = decrypt(token, secret)?;
    let pairs = parse_pairs(&plaintext);
    tracing::debug!(pairs = pairs.len(), fields = fields.len(), "decrypted payload");
    Ok(bind(&pairs, fields))
}

/// Reads an encrypted token from a named query parameter and binds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedParameters {
    parameter_name: String,
}

impl Default for EncryptedParameters {
    fn default() -> Self {
        Self::new(DEFAULT_PARAMETER_NAME)
    }
}

impl EncryptedParameters {
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
        }
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// First value of the token parameter in `query`.  A leading `?` is
    /// ignored.
    pub fn token_from_query(&self, query: &str) -> Option<String> {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == self.parameter_name.as_str())
            .map(|(_, v)| v.into_owned())
    }

    /// Find the token in `query`, decrypt it and bind `fields`.
    pub fn bind_query(&self, query: &str, secret: &str, fields: &[FieldSpec]) -> Result<Bindings> {
        let token = self.token_from_query(query).ok_or_else(|| {
            tracing::debug!(parameter = %self.parameter_name, "token parameter missing");
            SealedParamsError::MissingToken(self.parameter_name.clone())
        })?;
        decrypt_and_bind(&token, secret, fields)
    }

    /// Build the `name=token` query fragment a sender appends to a URL.
    pub fn query_fragment(&self, token: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.parameter_name, token)
            .finish()
    }
}
