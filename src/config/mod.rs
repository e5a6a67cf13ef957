//! Configuration loaded from `.sealparams.toml`.

pub mod settings;

pub use settings::Settings;
