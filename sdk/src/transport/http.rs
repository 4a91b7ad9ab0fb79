//! HTTP transport to an attached IDE debugger plugin

use super::DebugSession;
use crate::error::{DebugError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use wfdbg_core::{EventIndex, WorkflowHistory};

/// Environment variable overriding the debugger plugin base URL.
pub const DEBUGGER_URL_ENV: &str = "WFDBG_DEBUGGER_URL";

/// Default plugin address when the environment does not say otherwise.
pub const DEFAULT_DEBUGGER_URL: &str = "http://127.0.0.1:54578";

/// Per-request timeout; pause queries run on the replay context and must
/// stay bounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct BreakpointsPayload {
    breakpoints: Vec<EventIndex>,
}

/// Debug session reached over the IDE plugin's local HTTP endpoint.
///
/// Protocol: `GET /history` returns the history snapshot to replay,
/// `GET /breakpoints` the currently set breakpoints as
/// `{"breakpoints": [..]}`, and `POST /current-event` receives
/// `{"eventId": n}` when replay suspends, so the frontend can highlight the
/// paused event.
pub struct HttpDebugSession {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpDebugSession {
    /// Connect to the plugin at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DebugError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Connect using [`DEBUGGER_URL_ENV`], falling back to
    /// [`DEFAULT_DEBUGGER_URL`].
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(DEBUGGER_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_DEBUGGER_URL.to_string());
        Self::new(base_url)
    }

    /// The plugin base URL this session talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DebugSession for HttpDebugSession {
    fn fetch_history(&self) -> Result<WorkflowHistory> {
        let url = format!("{}/history", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DebugError::Transport(format!("could not get history: {e}")))?;
        if !response.status().is_success() {
            return Err(DebugError::Transport(format!(
                "could not get history: HTTP {}",
                response.status()
            )));
        }
        let body = response
            .bytes()
            .map_err(|e| DebugError::Transport(format!("could not read history: {e}")))?;
        WorkflowHistory::from_json_slice(&body).map_err(DebugError::from)
    }

    fn pause_requested(&self, index: EventIndex) -> bool {
        let url = format!("{}/breakpoints", self.base_url);
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "could not get breakpoints from debugger");
                return false;
            }
        };
        match response.json::<BreakpointsPayload>() {
            Ok(payload) => payload.breakpoints.contains(&index),
            Err(e) => {
                warn!(error = %e, "could not decode breakpoints payload");
                false
            }
        }
    }

    fn on_paused(&self, index: EventIndex) {
        let url = format!("{}/current-event", self.base_url);
        let payload = serde_json::json!({ "eventId": index });
        match self.client.post(&url).json(&payload).send() {
            Ok(response) if response.status().is_success() => {
                debug!(event_id = index, "highlighted current event in debugger");
            }
            Ok(response) => {
                warn!(
                    event_id = index,
                    status = %response.status(),
                    "highlight request rejected"
                );
            }
            Err(e) => {
                warn!(event_id = index, error = %e, "highlight request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_base_url() {
        let session = HttpDebugSession::new("http://127.0.0.1:9999").unwrap();
        assert_eq!(session.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_breakpoints_payload_shape() {
        let payload: BreakpointsPayload =
            serde_json::from_str(r#"{"breakpoints": [3, 9, 15, 21]}"#).unwrap();
        assert_eq!(payload.breakpoints, vec![3, 9, 15, 21]);
    }

    #[test]
    fn test_unreachable_plugin_degrades_to_no_pause() {
        // Nothing listens here; the query must answer false, not hang or fail.
        let session = HttpDebugSession::new("http://127.0.0.1:1").unwrap();
        assert!(!session.pause_requested(9));
    }

    #[test]
    fn test_unreachable_plugin_fails_history_fetch() {
        let session = HttpDebugSession::new("http://127.0.0.1:1").unwrap();
        let err = session.fetch_history().unwrap_err();
        assert!(matches!(err, DebugError::Transport(_)));
    }
}
