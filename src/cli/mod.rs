//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::binding::FieldSpec;
use crate::config::Settings;
use crate::errors::{Result, SealedParamsError};

/// Environment variable checked first for the shared secret.
pub const SECRET_ENV_VAR: &str = "SEALPARAMS_SECRET";

/// sealparams CLI: pack request parameters into an encrypted token.
#[derive(Parser)]
#[command(
    name = "sealparams",
    about = "Pack request parameters into an encrypted token and bind them back",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing .sealparams.toml (default: current directory)
    #[arg(long, default_value = ".", global = true)]
    pub config_dir: String,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encode key=value pairs as a query string and encrypt them
    Seal {
        /// Pairs to seal (e.g. number=42 name=Ada)
        #[arg(required = true)]
        pairs: Vec<String>,

        /// Print `<parameter>=<token>` ready to append to a URL
        #[arg(long)]
        query: bool,
    },

    /// Encrypt a raw plaintext payload
    Encrypt {
        /// Plaintext to encrypt (usually a query string)
        plaintext: String,
    },

    /// Decrypt a token and print its plaintext payload
    Decrypt {
        /// Token to decrypt
        token: String,
    },

    /// Decrypt a token and bind its payload to typed fields
    Bind {
        /// Token, or a full query string when --query is given
        input: String,

        /// Field to bind, as NAME:TYPE (e.g. number:int, id:guid?)
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// Treat INPUT as a query string and read the token from the configured parameter
        #[arg(long)]
        query: bool,

        /// Output format: table (default) or json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// is honoured, falling back to warnings only.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sealed_params=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load settings from the `--config-dir` directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(Path::new(&cli.config_dir))
}

/// Get the shared secret, trying in order:
/// 1. `SEALPARAMS_SECRET` env var
/// 2. `secret` in `.sealparams.toml`
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn resolve_secret(settings: &Settings) -> Result<Zeroizing<String>> {
    if let Ok(secret) = std::env::var(SECRET_ENV_VAR) {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    if let Some(secret) = &settings.secret {
        output::warning(&format!(
            "Using secret from {}; prefer the {SECRET_ENV_VAR} environment variable.",
            Settings::FILE_NAME
        ));
        return Ok(Zeroizing::new(secret.clone()));
    }

    let secret = dialoguer::Password::new()
        .with_prompt("Enter shared secret")
        .interact()
        .map_err(|e| SealedParamsError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Split a `key=value` argument.  The value may itself contain `=`.
pub fn parse_pair(arg: &str) -> Result<(&str, &str)> {
    let (key, value) = arg.split_once('=').ok_or_else(|| {
        SealedParamsError::CommandFailed(format!("expected KEY=VALUE, got '{arg}'"))
    })?;

    if key.is_empty() {
        return Err(SealedParamsError::CommandFailed(format!(
            "key cannot be empty in '{arg}'"
        )));
    }

    Ok((key, value))
}

/// Parse every `--field NAME:TYPE` argument.
pub fn parse_fields(args: &[String]) -> Result<Vec<FieldSpec>> {
    args.iter().map(|arg| arg.parse::<FieldSpec>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{TargetType, ValueKind};

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(parse_pair("number=42").unwrap(), ("number", "42"));
        assert_eq!(parse_pair("expr=a=b").unwrap(), ("expr", "a=b"));
        assert_eq!(parse_pair("empty=").unwrap(), ("empty", ""));
    }

    #[test]
    fn parse_pair_rejects_missing_equals() {
        assert!(parse_pair("number").is_err());
    }

    #[test]
    fn parse_pair_rejects_empty_key() {
        assert!(parse_pair("=42").is_err());
    }

    #[test]
    fn parse_fields_collects_specs() {
        let fields = parse_fields(&["number:int".into(), "id:guid?".into()]).unwrap();
        assert_eq!(fields[0], FieldSpec::new("number", ValueKind::I32));
        assert_eq!(fields[1], FieldSpec::new("id", TargetType::nullable(ValueKind::Uuid)));
    }

    #[test]
    fn parse_fields_fails_on_bad_spec() {
        assert!(parse_fields(&["number:int".into(), "oops".into()]).is_err());
    }
}
