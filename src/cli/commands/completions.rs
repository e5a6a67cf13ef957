//! `sealparams completions` — print a shell completion script to stdout.

use std::io;

use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, SealedParamsError};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = shell_from_name(shell)?;
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}

/// Case-insensitive shell lookup; `ps` is accepted for PowerShell.
fn shell_from_name(name: &str) -> Result<Shell> {
    if name.eq_ignore_ascii_case("ps") {
        return Ok(Shell::PowerShell);
    }
    <Shell as ValueEnum>::from_str(name, true).map_err(|_| {
        let supported: Vec<String> = Shell::value_variants()
            .iter()
            .filter_map(|s| s.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        SealedParamsError::CommandFailed(format!(
            "unknown shell '{name}' (supported: {})",
            supported.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_shells_resolve() {
        assert_eq!(shell_from_name("bash").unwrap(), Shell::Bash);
        assert_eq!(shell_from_name("Zsh").unwrap(), Shell::Zsh);
        assert_eq!(shell_from_name("ps").unwrap(), Shell::PowerShell);
    }

    #[test]
    fn unknown_shell_lists_supported_ones() {
        let err = shell_from_name("csh").unwrap_err().to_string();
        assert!(err.contains("csh"));
        assert!(err.contains("fish"));
    }
}
