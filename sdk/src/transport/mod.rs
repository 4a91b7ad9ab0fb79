//! Debugger-side transports
//!
//! The host debugging environment owns the channel that carries breakpoint
//! and continue signals; the bridge only requires the narrow, synchronous
//! surface below. [`HttpDebugSession`] implements it for IDE plugins that
//! expose the local HTTP endpoint.

mod http;

pub use http::{HttpDebugSession, DEBUGGER_URL_ENV, DEFAULT_DEBUGGER_URL};

use crate::error::Result;
use wfdbg_core::{EventIndex, WorkflowHistory};

/// An attached debugging session (an IDE frontend or equivalent).
///
/// Calls arrive on the engine's replay context, so every method must be
/// non-blocking or strictly bounded; a pause query that hangs would stall
/// replay even on boundaries without breakpoints.
pub trait DebugSession: Send + Sync {
    /// Fetch the complete history snapshot to replay.
    ///
    /// Replay needs a stable, reproducible history to step through, so the
    /// snapshot is taken once, before replay begins, even for a live
    /// session.
    fn fetch_history(&self) -> Result<WorkflowHistory>;

    /// Non-blocking query: has the debugger requested a pause at this
    /// boundary?
    ///
    /// The frontend may set breakpoints interactively without
    /// pre-registering indices, so this is consulted at every boundary.
    /// Transport failures must degrade to `false`, never abort replay.
    fn pause_requested(&self, index: EventIndex) -> bool;

    /// Notify the debugger that replay is suspended at `index`.
    ///
    /// Best-effort; failures are logged and ignored.
    fn on_paused(&self, _index: EventIndex) {}
}
