use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Scenario already exists: {0}")]
    DuplicateScenario(String),

    #[error("Unsupported scenario format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: String, expected: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RoiError {
    fn from(e: serde_json::Error) -> Self {
        RoiError::SerializationError(e.to_string())
    }
}
