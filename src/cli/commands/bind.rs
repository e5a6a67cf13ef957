//! `sealparams bind` — decrypt a token and bind its payload to typed fields.

use crate::cli::output;
use crate::cli::{load_settings, parse_fields, resolve_secret, Cli};
use crate::errors::{Result, SealedParamsError};
use crate::filter::decrypt_and_bind;

/// Execute the `bind` command.
///
/// Bound fields are always printed.  If any field failed to convert, the
/// command still prints the rest and then exits with an error.
pub fn execute(
    cli: &Cli,
    input: &str,
    field_args: &[String],
    from_query: bool,
    format: &str,
) -> Result<()> {
    let fields = parse_fields(field_args)?;
    let format = OutputFormat::parse(format)?;

    let settings = load_settings(cli)?;
    let secret = resolve_secret(&settings)?;

    let bindings = if from_query {
        settings
            .encrypted_parameters()
            .bind_query(input, &secret, &fields)?
    } else {
        decrypt_and_bind(input, &secret, &fields)?
    };

    match format {
        OutputFormat::Table => output::print_bindings_table(&fields, &bindings),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&bindings)
                .map_err(|e| SealedParamsError::SerializationError(e.to_string()))?;
            println!("{json}");
        }
    }

    let failed = bindings.errors().count();
    if failed > 0 {
        return Err(SealedParamsError::CommandFailed(format!(
            "{failed} field(s) failed to convert"
        )));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(SealedParamsError::CommandFailed(format!(
                "unknown format '{other}' (supported: table, json)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formats() {
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("yaml").is_err());
    }
}
