//! # wfdbg SDK
//!
//! Replay interception and breakpoint coordination for debugging recorded
//! workflow histories: step through a deterministic replay as if it were a
//! live program under a debugger, pausing at chosen task boundaries and
//! resuming on command.
//!
//! The bridge attaches to an external deterministic replay engine through
//! the [`wfdbg_core`] interception contract and never alters the replayed
//! outcome. Two breakpoint sources are supported behind one contract: a
//! pre-declared index list (standalone mode) and a live IDE debugging
//! session (ide mode).
//!
//! # Example
//!
//! ```ignore
//! use wfdbg_sdk::{ReplayMode, ReplaySession};
//!
//! let session = ReplaySession::builder()
//!     .mode(ReplayMode::Standalone)
//!     .history_file("payment-workflow.json")
//!     .breakpoints([3, 9, 15, 21])
//!     .build()?;
//!
//! let controller = session.controller();
//! // Drive `controller.resume()` from another thread, then:
//! let result = session.replay(&my_engine_adapter, "payment-workflow")?;
//! ```

pub mod breakpoint;
pub mod coordinator;
mod driver;
pub mod error;
pub mod interceptor;
pub mod session;
pub mod transport;

/// Testing utilities: simulated replayer and history builders.
/// Available only with the `testing` feature enabled.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use breakpoint::BreakpointRegistry;
pub use coordinator::{SessionPhase, SuspendCoordinator, SuspendToken};
pub use error::{DebugError, Result};
pub use interceptor::BoundaryInterceptor;
pub use session::{
    HistorySource, ReplayMode, ReplayOptions, ReplaySession, ReplaySessionBuilder,
    SessionController,
};
pub use transport::{DebugSession, HttpDebugSession, DEBUGGER_URL_ENV, DEFAULT_DEBUGGER_URL};

// Re-export the core contract so engine adapters need only this crate
pub use wfdbg_core::{
    EngineError, EventIndex, EventType, HistoryEvent, NoopInterceptor, ReplayInterceptor,
    SessionCancelled, WorkflowHistory, WorkflowReplayer,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::breakpoint::BreakpointRegistry;
    pub use crate::coordinator::SessionPhase;
    pub use crate::error::{DebugError, Result};
    pub use crate::session::{
        ReplayMode, ReplayOptions, ReplaySession, ReplaySessionBuilder, SessionController,
    };
    pub use crate::transport::{DebugSession, HttpDebugSession};
    pub use wfdbg_core::{
        EngineError, EventIndex, EventType, HistoryEvent, ReplayInterceptor, SessionCancelled,
        WorkflowHistory, WorkflowReplayer,
    };
}
