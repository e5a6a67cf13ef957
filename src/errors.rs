use thiserror::Error;

/// All operation-level errors that can occur in sealed-params.
///
/// Per-field conversion failures are not in here: they are collected as
/// [`crate::binding::ConversionError`] next to the fields that did bind.
#[derive(Debug, Error)]
pub enum SealedParamsError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong secret or corrupted token")]
    DecryptionFailed,

    // --- Binding errors ---
    #[error("No encrypted token found under parameter '{0}'")]
    MissingToken(String),

    #[error("Invalid field spec: {0}")]
    InvalidFieldSpec(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for sealed-params results.
pub type Result<T> = std::result::Result<T, SealedParamsError>;
