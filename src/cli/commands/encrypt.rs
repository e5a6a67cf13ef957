//! `sealparams encrypt` — encrypt a raw plaintext payload.

use crate::cli::{load_settings, resolve_secret, Cli};
use crate::crypto::encrypt;
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, plaintext: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let secret = resolve_secret(&settings)?;

    println!("{}", encrypt(plaintext, &secret)?);

    Ok(())
}
