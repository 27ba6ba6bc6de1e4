use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("core error: {0}")]
    Core(#[from] raynaui_core::Error),
    #[error("generation error: {0}")]
    Generate(#[from] raynaui_generate::GenerateError),
    #[error("filesystem error: {0}")]
    Materialize(#[from] raynaui_materialize::MaterializeError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("registry item failed validation with {0} error(s)")]
    InvalidManifest(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A required value was not supplied and could not be asked for.
    #[error("{0}")]
    Missing(String),
}

pub type CliResult<T> = Result<T, CliError>;
