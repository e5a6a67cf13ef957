//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::binding::{Binding, Bindings, FieldSpec};

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print one row per requested field (Field, Type, Result).
///
/// Fields missing from the payload are shown as absent so the table
/// always lines up with the request.
pub fn print_bindings_table(fields: &[FieldSpec], bindings: &Bindings) {
    if bindings.is_empty() {
        info("None of the requested fields are present in the token.");
        tip("Run `sealparams decrypt <TOKEN>` to inspect the payload.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Type", "Result"]);

    for field in fields {
        let result = match bindings.get(&field.name) {
            Some(Binding::Value(value)) => value.to_string(),
            Some(Binding::Error(err)) => format!("error: {}", err.cause),
            None => "(absent)".to_string(),
        };
        table.add_row(vec![field.name.clone(), field.target.to_string(), result]);
    }

    println!("{table}");
}
