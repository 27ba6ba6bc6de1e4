use thiserror::Error;

/// Core error type shared across RaynaUI crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The generation record violates a structural rule.
    #[error("invalid generation record: {0}")]
    InvalidGeneration(String),
    /// An option value could not be understood.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// A registry document could not be checked.
    #[error("registry schema error: {0}")]
    RegistrySchema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by RaynaUI crates.
pub type Result<T> = std::result::Result<T, Error>;
