//! History event types observed during replay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position of an event in a replayed history.
///
/// 1-based and strictly increasing within one workflow run. Used as the
/// breakpoint key.
pub type EventIndex = i64;

/// Classification of a history event.
///
/// The bridge interprets only enough of the engine's format to find task
/// boundaries and the terminal outcome; everything else is carried
/// opaquely. Names outside this set decode as [`EventType::Unknown`] and
/// are never matched as boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    WorkflowStarted,
    /// Workflow logic resumes execution here; the only suspendable point.
    TaskStarted,
    TaskScheduled,
    TaskCompleted,
    ActivityScheduled,
    ActivityStarted,
    ActivityCompleted,
    ActivityFailed,
    TimerStarted,
    TimerFired,
    SignalReceived,
    WorkflowCompleted,
    WorkflowFailed,
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Check if replay pauses are possible at this event
    pub fn is_task_boundary(&self) -> bool {
        matches!(self, Self::TaskStarted)
    }

    /// Check if this event terminates the workflow
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::WorkflowCompleted | Self::WorkflowFailed)
    }

    /// Get the string representation used in the history document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkflowStarted => "WORKFLOW_STARTED",
            Self::TaskStarted => "TASK_STARTED",
            Self::TaskScheduled => "TASK_SCHEDULED",
            Self::TaskCompleted => "TASK_COMPLETED",
            Self::ActivityScheduled => "ACTIVITY_SCHEDULED",
            Self::ActivityStarted => "ACTIVITY_STARTED",
            Self::ActivityCompleted => "ACTIVITY_COMPLETED",
            Self::ActivityFailed => "ACTIVITY_FAILED",
            Self::TimerStarted => "TIMER_STARTED",
            Self::TimerFired => "TIMER_FIRED",
            Self::SignalReceived => "SIGNAL_RECEIVED",
            Self::WorkflowCompleted => "WORKFLOW_COMPLETED",
            Self::WorkflowFailed => "WORKFLOW_FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// One recorded event from a workflow execution history.
///
/// Immutable once loaded. The `attributes` payload is engine-specific and
/// carried untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Position of this event in the history (1-based)
    #[serde(rename = "eventId")]
    event_id: EventIndex,

    /// Classification of the event
    #[serde(rename = "eventType")]
    event_type: EventType,

    /// Engine-specific payload (varies by event type)
    #[serde(default)]
    attributes: Value,

    /// Timestamp of the event, when the recording includes one
    #[serde(rename = "eventTime", default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

impl HistoryEvent {
    /// Create a new history event
    pub fn new(event_id: EventIndex, event_type: EventType, attributes: Value) -> Self {
        Self {
            event_id,
            event_type,
            attributes,
            timestamp: None,
        }
    }

    /// Set the event timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Get the event's position in the history
    pub fn event_id(&self) -> EventIndex {
        self.event_id
    }

    /// Get the event type
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Get the timestamp, if recorded
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Get the engine-specific payload
    pub fn attributes(&self) -> &Value {
        &self.attributes
    }

    /// Get a field from the payload as a string
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// Get a field from the payload as an i64
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(|v| v.as_i64())
    }

    /// Get a field from the payload
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
