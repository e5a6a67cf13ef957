use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SealedParamsError};
use crate::filter::{EncryptedParameters, DEFAULT_PARAMETER_NAME};

/// Project-level configuration, loaded from `.sealparams.toml`.
///
/// Every field has a default so the tool works without any config file.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Query parameter that carries the encrypted token.
    #[serde(default = "default_parameter_name")]
    pub parameter_name: String,

    /// Shared secret.  Prefer the `SEALPARAMS_SECRET` environment
    /// variable over storing it here.
    #[serde(default)]
    pub secret: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_parameter_name() -> String {
    DEFAULT_PARAMETER_NAME.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            parameter_name: default_parameter_name(),
            secret: None,
        }
    }
}

// Never print the secret.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("parameter_name", &self.parameter_name)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = ".sealparams.toml";

    /// Load settings from `<dir>/.sealparams.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SealedParamsError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.parameter_name.trim().is_empty() {
            return Err(SealedParamsError::ConfigError(format!(
                "parameter_name in {} cannot be empty",
                config_path.display()
            )));
        }

        tracing::debug!(path = %config_path.display(), "loaded config file");
        Ok(settings)
    }

    /// Build the request filter for the configured parameter name.
    pub fn encrypted_parameters(&self) -> EncryptedParameters {
        EncryptedParameters::new(self.parameter_name.clone())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.parameter_name, "secret");
        assert!(s.secret.is_none());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.parameter_name, "secret");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
parameter_name = "payload"
secret = "k1"
"#;
        fs::write(tmp.path().join(".sealparams.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.parameter_name, "payload");
        assert_eq!(settings.secret.as_deref(), Some("k1"));
        assert_eq!(settings.encrypted_parameters().parameter_name(), "payload");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".sealparams.toml"), "secret = \"k1\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.parameter_name, "secret");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".sealparams.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_empty_parameter_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".sealparams.toml"), "parameter_name = \"\"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let s = Settings {
            secret: Some("hunter2".into()),
            ..Settings::default()
        };
        let printed = format!("{s:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("redacted"));
    }
}
