//! History sources resolved per replay mode

use crate::error::{DebugError, Result};
use crate::transport::DebugSession;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wfdbg_core::WorkflowHistory;

/// Where the replayed history comes from.
///
/// Both variants yield the same thing: a finite, validated history
/// available in full before replay begins. Debugging needs a stable,
/// reproducible sequence to step through, so even the attached variant
/// takes one snapshot rather than streaming.
pub enum HistorySource {
    /// A complete recorded history in a local file (standalone mode)
    File(PathBuf),
    /// A snapshot fetched from an attached debugging session (IDE mode)
    Attached(Arc<dyn DebugSession>),
}

impl fmt::Debug for HistorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Attached(_) => f.debug_tuple("Attached").finish(),
        }
    }
}

impl HistorySource {
    /// Load the full history.
    ///
    /// An absent file fails with [`DebugError::HistoryNotFound`];
    /// undecodable content fails with [`DebugError::HistoryMalformed`].
    pub fn load(&self) -> Result<WorkflowHistory> {
        match self {
            Self::File(path) => load_file(path),
            Self::Attached(session) => session.fetch_history(),
        }
    }
}

fn load_file(path: &Path) -> Result<WorkflowHistory> {
    let bytes = std::fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => DebugError::HistoryNotFound(path.display().to_string()),
        _ => DebugError::Io(err),
    })?;
    WorkflowHistory::from_json_slice(&bytes).map_err(DebugError::from)
}
