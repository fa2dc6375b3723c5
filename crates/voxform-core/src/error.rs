use thiserror::Error;

/// Top-level error type for Voxform.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for VoxformError` so that the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoxformError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dictation error: {0}")]
    Dictation(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VoxformError {
    fn from(err: toml::de::Error) -> Self {
        VoxformError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VoxformError {
    fn from(err: toml::ser::Error) -> Self {
        VoxformError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VoxformError {
    fn from(err: serde_json::Error) -> Self {
        VoxformError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Voxform operations.
pub type Result<T> = std::result::Result<T, VoxformError>;
