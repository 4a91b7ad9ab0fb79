//! Replay sessions: mode, options, and the aggregate debugging state
//!
//! Mode and breakpoints are per-session state, configured through
//! [`ReplaySessionBuilder`] and fixed before [`ReplaySession::replay`] is
//! invoked. Concurrent sessions in one process are fully independent.

mod controller;
mod source;

pub use controller::SessionController;
pub use source::HistorySource;

use crate::breakpoint::BreakpointRegistry;
use crate::coordinator::SuspendCoordinator;
use crate::error::{DebugError, Result};
use crate::transport::{DebugSession, HttpDebugSession};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use wfdbg_core::EventIndex;

/// Replay mode, fixed for the lifetime of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Replay a local history file with a pre-declared breakpoint list
    #[default]
    Standalone,
    /// Replay a history served by an attached IDE debugging session
    Ide,
}

impl fmt::Display for ReplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => write!(f, "standalone"),
            Self::Ide => write!(f, "ide"),
        }
    }
}

/// Configuration bundle consumed read-only by the replay driver.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Engine-specific options, forwarded to the replayer untouched
    pub engine_options: Value,
    /// History file to replay; required in standalone mode
    pub history_path: Option<PathBuf>,
}

/// Aggregate root of one debugging session.
///
/// Binds the mode, options, breakpoint registry, and suspend/resume
/// coordinator for a single replay. Owned by the caller for the session's
/// duration; control handles are obtained through
/// [`ReplaySession::controller`].
pub struct ReplaySession {
    id: Uuid,
    mode: ReplayMode,
    options: ReplayOptions,
    breakpoints: BreakpointRegistry,
    coordinator: SuspendCoordinator,
    debugger: Option<Arc<dyn DebugSession>>,
}

impl fmt::Debug for ReplaySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaySession")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("options", &self.options)
            .field("breakpoints", &self.breakpoints.snapshot())
            .field("debugger_attached", &self.debugger.is_some())
            .finish()
    }
}

impl ReplaySession {
    /// Start configuring a new session.
    pub fn builder() -> ReplaySessionBuilder {
        ReplaySessionBuilder::default()
    }

    /// The session's unique id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The session's replay mode.
    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    /// The session's configuration.
    pub fn options(&self) -> &ReplayOptions {
        &self.options
    }

    /// The session's breakpoint registry.
    pub fn breakpoints(&self) -> &BreakpointRegistry {
        &self.breakpoints
    }

    /// Replace the active breakpoint set.
    ///
    /// Usable at any time; boundaries already evaluated are unaffected.
    pub fn set_breakpoints<I>(&self, indices: I)
    where
        I: IntoIterator<Item = EventIndex>,
    {
        self.breakpoints.set(indices);
        debug!(
            session_id = %self.id,
            breakpoints = ?self.breakpoints.snapshot(),
            "breakpoints replaced"
        );
    }

    /// Obtain a control handle for the debugger side.
    pub fn controller(&self) -> SessionController {
        SessionController::new(self.coordinator.clone(), self.breakpoints.clone())
    }

    pub(crate) fn coordinator(&self) -> &SuspendCoordinator {
        &self.coordinator
    }

    pub(crate) fn debugger(&self) -> Option<&Arc<dyn DebugSession>> {
        self.debugger.as_ref()
    }
}

/// Builder for [`ReplaySession`].
///
/// Validation happens in [`build`](ReplaySessionBuilder::build), before any
/// replay starts: standalone mode requires a history file, and a debugger
/// session is only meaningful in IDE mode. In IDE mode, when no debugger
/// session is supplied explicitly, the HTTP transport is wired from the
/// environment.
#[derive(Default)]
pub struct ReplaySessionBuilder {
    mode: ReplayMode,
    options: ReplayOptions,
    breakpoints: Vec<EventIndex>,
    debugger: Option<Arc<dyn DebugSession>>,
}

impl ReplaySessionBuilder {
    /// Set the replay mode (standalone by default).
    pub fn mode(mut self, mode: ReplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the history file to replay (standalone mode).
    pub fn history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.history_path = Some(path.into());
        self
    }

    /// Set engine-specific options, forwarded untouched to the replayer.
    pub fn engine_options(mut self, options: Value) -> Self {
        self.options.engine_options = options;
        self
    }

    /// Seed the breakpoint set.
    pub fn breakpoints<I>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = EventIndex>,
    {
        self.breakpoints = indices.into_iter().collect();
        self
    }

    /// Attach a debugger session explicitly (IDE mode).
    pub fn debugger(mut self, session: Arc<dyn DebugSession>) -> Self {
        self.debugger = Some(session);
        self
    }

    /// Validate the configuration and create the session.
    pub fn build(self) -> Result<ReplaySession> {
        let debugger = match self.mode {
            ReplayMode::Standalone => {
                if self.options.history_path.is_none() {
                    return Err(DebugError::InvalidConfiguration(
                        "standalone mode requires a history file path".to_string(),
                    ));
                }
                if self.debugger.is_some() {
                    return Err(DebugError::InvalidConfiguration(
                        "a debugger session is only used in ide mode".to_string(),
                    ));
                }
                None
            }
            ReplayMode::Ide => {
                if let Some(path) = &self.options.history_path {
                    debug!(path = %path.display(), "history path is ignored in ide mode");
                }
                match self.debugger {
                    Some(session) => Some(session),
                    None => Some(Arc::new(HttpDebugSession::from_env()?) as Arc<dyn DebugSession>),
                }
            }
        };

        let breakpoints = BreakpointRegistry::new();
        breakpoints.set(self.breakpoints);

        Ok(ReplaySession {
            id: Uuid::new_v4(),
            mode: self.mode,
            options: self.options,
            breakpoints,
            coordinator: SuspendCoordinator::new(),
            debugger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(ReplayMode::Standalone.to_string(), "standalone");
        assert_eq!(ReplayMode::Ide.to_string(), "ide");
    }

    #[test]
    fn test_standalone_requires_history_path() {
        let err = ReplaySession::builder()
            .mode(ReplayMode::Standalone)
            .build()
            .unwrap_err();
        assert!(matches!(err, DebugError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("history file"));
    }

    #[test]
    fn test_standalone_rejects_debugger_session() {
        struct Dummy;
        impl DebugSession for Dummy {
            fn fetch_history(&self) -> Result<wfdbg_core::WorkflowHistory> {
                unreachable!()
            }
            fn pause_requested(&self, _index: EventIndex) -> bool {
                false
            }
        }

        let err = ReplaySession::builder()
            .history_file("/tmp/history.json")
            .debugger(Arc::new(Dummy))
            .build()
            .unwrap_err();
        assert!(matches!(err, DebugError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_standalone_session_carries_seeded_breakpoints() {
        let session = ReplaySession::builder()
            .history_file("/tmp/history.json")
            .breakpoints([3, 9, 15, 21])
            .build()
            .unwrap();

        assert_eq!(session.mode(), ReplayMode::Standalone);
        assert_eq!(session.breakpoints().snapshot(), vec![3, 9, 15, 21]);
        assert!(session.debugger().is_none());
    }

    #[test]
    fn test_set_breakpoints_replaces() {
        let session = ReplaySession::builder()
            .history_file("/tmp/history.json")
            .breakpoints([3])
            .build()
            .unwrap();

        session.set_breakpoints([9, 15]);
        assert_eq!(session.breakpoints().snapshot(), vec![9, 15]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = ReplaySession::builder()
            .history_file("/tmp/a.json")
            .breakpoints([1])
            .build()
            .unwrap();
        let b = ReplaySession::builder()
            .history_file("/tmp/b.json")
            .build()
            .unwrap();

        assert_ne!(a.id(), b.id());
        assert!(b.breakpoints().is_empty());
        a.controller().cancel();
        assert!(!b.coordinator().is_cancelled());
    }
}
