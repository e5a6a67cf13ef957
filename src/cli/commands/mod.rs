//! Subcommand implementations, one module per command.

pub mod bind;
pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod seal;
