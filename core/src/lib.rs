//! # wfdbg Core
//!
//! Language-agnostic core for the wfdbg workflow replay debugging bridge.
//!
//! This crate holds the parts of the bridge that do not depend on any
//! transport or control surface: the recorded history model and the
//! interception contract with the external deterministic replay engine.
//!
//! ## What's in Core vs SDK
//!
//! **Core** contains:
//! - History events, event indices, and the validated history container
//! - The [`ReplayInterceptor`] hook contract invoked at task boundaries
//! - The [`WorkflowReplayer`] entry point implemented by engine adapters
//! - Engine-side error types
//!
//! **SDK** contains the debugging bridge itself: breakpoint registry,
//! suspend/resume coordination, replay sessions, debugger transports, and
//! testing utilities.

pub mod engine;
pub mod error;
pub mod history;

// Re-export error types
pub use error::{CoreError, CoreResult};

// Re-export history types
pub use history::{EventIndex, EventType, HistoryEvent, WorkflowHistory};

// Re-export the engine contract
pub use engine::{
    EngineError, NoopInterceptor, ReplayInterceptor, SessionCancelled, WorkflowReplayer,
};
