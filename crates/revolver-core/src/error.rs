use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevolverError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Shape mismatch: {context} has {actual} periods, expected {expected}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RevolverError {
    fn from(e: serde_json::Error) -> Self {
        RevolverError::SerializationError(e.to_string())
    }
}
