//! Core error types for the wfdbg replay debugging bridge
//!
//! These cover history loading and validation; failures raised by the
//! external replay engine have their own taxonomy in [`crate::engine`].

/// Core error type for history handling
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested history does not exist
    #[error("history not found: {0}")]
    HistoryNotFound(String),

    /// History content could not be decoded as the engine's expected format
    #[error("history malformed: {0}")]
    HistoryMalformed(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_errors_are_distinct() {
        let not_found = CoreError::HistoryNotFound("/tmp/missing.json".to_string());
        let malformed = CoreError::HistoryMalformed("unexpected token".to_string());

        assert!(not_found.to_string().contains("history not found"));
        assert!(malformed.to_string().contains("history malformed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
