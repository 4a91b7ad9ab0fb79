//! Replay driver: wires a session into the external engine and runs it

use crate::error::{DebugError, Result};
use crate::interceptor::BoundaryInterceptor;
use crate::session::{HistorySource, ReplayMode, ReplaySession};
use serde_json::Value;
use tracing::{debug, info, warn};
use wfdbg_core::WorkflowReplayer;

impl ReplaySession {
    /// Replay `workflow_kind` under this session's debugging configuration.
    ///
    /// Resolves the history source for the session's mode, loads the
    /// history, registers the boundary interceptor with the engine, and
    /// surfaces the terminal result or failure unchanged. Runs on the
    /// calling thread and blocks for the whole replay, including any
    /// breakpoint pauses; drive resumption from a [`SessionController`]
    /// obtained before this call.
    ///
    /// All breakpoint state is cleared when this returns, success or not;
    /// a session is spent after one replay.
    ///
    /// [`SessionController`]: crate::session::SessionController
    pub fn replay<R>(&self, replayer: &R, workflow_kind: &str) -> Result<Value>
    where
        R: WorkflowReplayer,
    {
        info!(
            session_id = %self.id(),
            mode = %self.mode(),
            workflow_kind,
            "starting replay"
        );
        let result = self.run_replay(replayer, workflow_kind);
        // Leave nothing behind: registry emptied, outstanding token
        // invalidated, phase terminated.
        self.breakpoints().clear();
        self.coordinator().finish();
        match &result {
            Ok(_) => info!(session_id = %self.id(), "replay completed"),
            Err(err) => warn!(session_id = %self.id(), error = %err, "replay ended with failure"),
        }
        result
    }

    fn run_replay<R>(&self, replayer: &R, workflow_kind: &str) -> Result<Value>
    where
        R: WorkflowReplayer,
    {
        let source = self.history_source()?;
        let history = source.load()?;
        debug!(
            events = history.len(),
            boundaries = history.task_boundaries().count(),
            last_index = history.last_index(),
            "history loaded"
        );

        let interceptor = BoundaryInterceptor::new(
            self.breakpoints().clone(),
            self.coordinator().clone(),
            self.debugger().cloned(),
        );
        let output = replayer.replay(
            &history,
            workflow_kind,
            &interceptor,
            &self.options().engine_options,
        )?;
        Ok(output)
    }

    fn history_source(&self) -> Result<HistorySource> {
        match self.mode() {
            ReplayMode::Standalone => {
                let path = self.options().history_path.clone().ok_or_else(|| {
                    DebugError::InvalidConfiguration(
                        "standalone mode requires a history file path".to_string(),
                    )
                })?;
                Ok(HistorySource::File(path))
            }
            ReplayMode::Ide => {
                let session = self.debugger().cloned().ok_or_else(|| {
                    DebugError::InvalidConfiguration(
                        "ide mode requires an attached debugger session".to_string(),
                    )
                })?;
                Ok(HistorySource::Attached(session))
            }
        }
    }
}
