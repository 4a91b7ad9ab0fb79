//! Interception contract with the external deterministic replay engine.
//!
//! The replay engine itself (task scheduling, activity and timer
//! simulation, history parsing) is an external collaborator. The bridge
//! only requires two seams: a hook invoked at every workflow-task boundary,
//! and an entry point that drives one replay to its terminal result.

use crate::history::{EventIndex, WorkflowHistory};
use serde_json::Value;

/// Control signal released from a suspended task boundary when the session
/// is cancelled instead of resumed.
///
/// Not a business failure: it reports that the debugger side gave up while
/// replay was (or was about to be) suspended at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session cancelled while suspended at event {index}")]
pub struct SessionCancelled {
    /// The task boundary whose suspension was abandoned
    pub index: EventIndex,
}

/// Failures surfaced by the external replay engine.
///
/// Propagated unchanged to the replay driver's caller; the bridge never
/// retries or swallows them, since replay correctness must stay transparent
/// for debugging.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An interception hook aborted replay
    #[error(transparent)]
    Interrupted(#[from] SessionCancelled),

    /// Replayed workflow commands diverged from the recorded history
    #[error("non-deterministic history at event {index}: {detail}")]
    NondeterministicHistory { index: EventIndex, detail: String },

    /// The workflow logic failed during replay
    #[error("workflow execution failed: {0}")]
    ExecutionFailed(String),

    /// Replay reached the end of history without a terminal workflow event
    #[error("history ended without a terminal workflow event")]
    MissingResult,
}

/// Hook invoked by the replay engine at every workflow-task boundary.
///
/// The engine calls this synchronously, once per boundary, in event order,
/// on the single execution context that drives replay for a run. The hook
/// may block (that is how breakpoints pause replay); it must never be
/// invoked concurrently for one run. Returning an error obliges the engine
/// to abort replay and propagate the error unchanged.
pub trait ReplayInterceptor: Send + Sync {
    /// Called when workflow logic is about to resume at `index`.
    fn on_task_boundary(&self, index: EventIndex) -> Result<(), EngineError>;
}

/// An interceptor that never pauses.
///
/// Useful as a default and for comparing debugged replays against an
/// uninstrumented run of the same history.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInterceptor;

impl ReplayInterceptor for NoopInterceptor {
    fn on_task_boundary(&self, _index: EventIndex) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Entry point of the external deterministic replay engine.
///
/// Implementations adapt a concrete engine. They own everything about
/// workflow execution; the bridge requires only that the interceptor fires
/// at each task boundary and that the workflow's terminal result or failure
/// is surfaced unchanged.
///
/// `options` is an engine-specific configuration bundle forwarded untouched
/// from [`ReplayOptions`](https://docs.rs/wfdbg-sdk); engines that need
/// none ignore it.
pub trait WorkflowReplayer {
    /// Replay `workflow_kind` against the given history.
    fn replay(
        &self,
        history: &WorkflowHistory,
        workflow_kind: &str,
        interceptor: &dyn ReplayInterceptor,
        options: &Value,
    ) -> Result<Value, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_interceptor_never_fails() {
        let interceptor = NoopInterceptor;
        assert!(interceptor.on_task_boundary(1).is_ok());
        assert!(interceptor.on_task_boundary(i64::MAX).is_ok());
    }

    #[test]
    fn test_cancelled_maps_to_interrupted() {
        let err: EngineError = SessionCancelled { index: 9 }.into();
        assert!(matches!(
            err,
            EngineError::Interrupted(SessionCancelled { index: 9 })
        ));
        assert!(err.to_string().contains("event 9"));
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::NondeterministicHistory {
            index: 4,
            detail: "expected ACTIVITY_SCHEDULED".to_string(),
        };
        assert!(err.to_string().contains("event 4"));

        assert!(EngineError::MissingResult.to_string().contains("terminal"));
    }
}
