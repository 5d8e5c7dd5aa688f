//! Sanitiser specific errors.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Invalid sanitiser configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for sanitiser operations
pub type SecurityResult<T> = Result<T, SecurityError>;
