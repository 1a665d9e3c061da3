use thiserror::Error;

/// Errors raised while building or validating a configuration snapshot.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A parameter lies outside its declared domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An enum name that does not match any variant.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant {
        kind: &'static str,
        value: String,
    },

    /// Malformed hex color literal.
    #[error("Invalid color literal '{0}'")]
    InvalidColor(String),

    /// Snapshot could not be (de)serialized.
    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}
