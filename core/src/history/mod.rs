//! Workflow history: the ordered, immutable record replayed by the engine

mod event;

pub use event::{EventIndex, EventType, HistoryEvent};

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Document shape of a recorded history file or snapshot.
#[derive(Deserialize)]
struct HistoryDocument {
    events: Vec<HistoryEvent>,
}

/// A finite, ordered workflow execution history.
///
/// Construction validates the invariants the bridge relies on: at least one
/// event, and strictly increasing event ids. The event contents stay
/// opaque; compatibility with the engine's encoding is the engine's
/// concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowHistory {
    events: Vec<HistoryEvent>,
}

impl WorkflowHistory {
    /// Build a history from an ordered event sequence.
    pub fn from_events(events: Vec<HistoryEvent>) -> CoreResult<Self> {
        if events.is_empty() {
            return Err(CoreError::HistoryMalformed(
                "history contains no events".to_string(),
            ));
        }
        let mut last = 0;
        for event in &events {
            if event.event_id() <= last {
                return Err(CoreError::HistoryMalformed(format!(
                    "event ids must be strictly increasing: {} after {}",
                    event.event_id(),
                    last
                )));
            }
            last = event.event_id();
        }
        Ok(Self { events })
    }

    /// Decode a history document.
    ///
    /// Accepts the engine's `{"events": [...]}` shape as well as a bare
    /// event array; anything else fails with
    /// [`CoreError::HistoryMalformed`].
    pub fn from_json_slice(bytes: &[u8]) -> CoreResult<Self> {
        let events = match serde_json::from_slice::<HistoryDocument>(bytes) {
            Ok(document) => document.events,
            Err(document_err) => serde_json::from_slice::<Vec<HistoryEvent>>(bytes)
                .map_err(|_| CoreError::HistoryMalformed(document_err.to_string()))?,
        };
        Self::from_events(events)
    }

    /// Get the events in replay order.
    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    /// Get the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// A validated history is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the id of the last event.
    pub fn last_index(&self) -> EventIndex {
        self.events.last().map(HistoryEvent::event_id).unwrap_or(0)
    }

    /// Iterate over the task-boundary events, in replay order.
    pub fn task_boundaries(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type().is_task_boundary())
    }

    /// Get the terminal workflow event, if the recording ran to completion.
    pub fn terminal_event(&self) -> Option<&HistoryEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| e.event_type().is_terminal())
    }
}
