//! Error types for the wfdbg SDK

// Re-export core error types
pub use wfdbg_core::{CoreError, EngineError, SessionCancelled};

/// Main error type for debugging sessions
#[derive(Debug, thiserror::Error)]
pub enum DebugError {
    /// Session mode and options are inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requested history does not exist
    #[error("history not found: {0}")]
    HistoryNotFound(String),

    /// History content could not be decoded as the engine's expected format
    #[error("history malformed: {0}")]
    HistoryMalformed(String),

    /// The session was cancelled while replay was suspended
    ///
    /// A control signal rather than a business failure: the debugger side
    /// gave up on the session.
    #[error(transparent)]
    SessionCancelled(SessionCancelled),

    /// Failure raised by the external replay engine, propagated unchanged
    #[error("engine replay failure: {0}")]
    Engine(EngineError),

    /// Debugger transport failure
    #[error("debugger transport error: {0}")]
    Transport(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for wfdbg SDK operations
pub type Result<T> = std::result::Result<T, DebugError>;

impl From<CoreError> for DebugError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::HistoryNotFound(path) => DebugError::HistoryNotFound(path),
            CoreError::HistoryMalformed(detail) => DebugError::HistoryMalformed(detail),
            CoreError::Io(e) => DebugError::Io(e),
            CoreError::Serialization(e) => DebugError::Serialization(e),
            CoreError::Other(msg) => DebugError::Transport(msg),
        }
    }
}

impl From<EngineError> for DebugError {
    fn from(err: EngineError) -> Self {
        match err {
            // Cancellation enters the engine through the interceptor; hand
            // it back to the caller as the control signal it is.
            EngineError::Interrupted(cancelled) => DebugError::SessionCancelled(cancelled),
            other => DebugError::Engine(other),
        }
    }
}

impl From<SessionCancelled> for DebugError {
    fn from(cancelled: SessionCancelled) -> Self {
        DebugError::SessionCancelled(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: DebugError = CoreError::HistoryNotFound("h.json".to_string()).into();
        assert!(matches!(err, DebugError::HistoryNotFound(_)));

        let err: DebugError = CoreError::HistoryMalformed("bad".to_string()).into();
        assert!(matches!(err, DebugError::HistoryMalformed(_)));
    }

    #[test]
    fn test_engine_interruption_becomes_session_cancelled() {
        let engine_err = EngineError::Interrupted(SessionCancelled { index: 9 });
        let err: DebugError = engine_err.into();
        assert!(matches!(
            err,
            DebugError::SessionCancelled(SessionCancelled { index: 9 })
        ));
    }

    #[test]
    fn test_other_engine_failures_stay_engine_failures() {
        let err: DebugError = EngineError::ExecutionFailed("boom".to_string()).into();
        assert!(matches!(err, DebugError::Engine(_)));
        assert!(err.to_string().contains("engine replay failure"));
    }
}
