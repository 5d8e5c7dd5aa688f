use tidyfrag_security::SecurityError;
use url::ParseError as UrlParseError;

/// Error types for the parser
///
/// Malformed markup is never an error. These variants are reserved for calls
/// that break their contract, such as asking for multi-valued attributes
/// without supplying somewhere to put them.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// A required argument was missing or unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlParseError),
    /// Sanitiser configuration error
    #[error(transparent)]
    Security(#[from] SecurityError),
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = ParserError::InvalidArgument("no multi-valued map".to_string());
        assert_eq!(err.to_string(), "Invalid argument: no multi-valued map");

        let err = ParserError::from(SecurityError::InvalidConfiguration("bad".to_string()));
        assert_eq!(err.to_string(), "Invalid sanitiser configuration: bad");
    }

    #[test]
    fn test_error_source() {
        let err = ParserError::from(UrlParseError::EmptyHost);
        assert!(err.source().is_some());

        let err = ParserError::InvalidArgument("test".to_string());
        assert!(err.source().is_none());
    }
}
