/// Core error types for Sutra Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Sutra Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON catalog could not be parsed
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML catalog could not be parsed
    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two text entries share a key
    #[error("Duplicate text panel key: {0}")]
    DuplicateTextKey(String),

    /// Catalog file extension is not recognized
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}
