//! `sealparams decrypt` — print the plaintext payload inside a token.

use crate::cli::{load_settings, resolve_secret, Cli};
use crate::crypto::decrypt;
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, token: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let secret = resolve_secret(&settings)?;

    let plaintext = decrypt(token, &secret)?;
    println!("{plaintext}");

    Ok(())
}
