//! `sealparams seal` — build a token from key=value pairs.

use crate::cli::{load_settings, parse_pair, resolve_secret, Cli};
use crate::crypto::seal_pairs;
use crate::errors::Result;

/// Execute the `seal` command.
pub fn execute(cli: &Cli, pairs: &[String], as_query: bool) -> Result<()> {
    let parsed = pairs
        .iter()
        .map(|arg| parse_pair(arg))
        .collect::<Result<Vec<_>>>()?;

    let settings = load_settings(cli)?;
    let secret = resolve_secret(&settings)?;

    let token = seal_pairs(parsed, &secret)?;

    if as_query {
        println!("{}", settings.encrypted_parameters().query_fragment(&token));
    } else {
        println!("{token}");
    }

    Ok(())
}
