//! Testing utilities: a simulated replayer and history builders
//!
//! Available with the `testing` feature enabled.

use chrono::Utc;
use serde_json::{json, Value};
use wfdbg_core::{
    EngineError, EventIndex, EventType, HistoryEvent, ReplayInterceptor, WorkflowHistory,
    WorkflowReplayer,
};

/// Minimal deterministic replayer for tests and demos.
///
/// Walks the recorded events in order, invokes the interceptor at every
/// task boundary, and returns the result recorded in the terminal event.
/// It simulates nothing else; production replay stays with the real
/// engine behind [`WorkflowReplayer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedReplayer;

impl SimulatedReplayer {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowReplayer for SimulatedReplayer {
    fn replay(
        &self,
        history: &WorkflowHistory,
        _workflow_kind: &str,
        interceptor: &dyn ReplayInterceptor,
        _options: &Value,
    ) -> Result<Value, EngineError> {
        for event in history.events() {
            if event.event_type().is_task_boundary() {
                interceptor.on_task_boundary(event.event_id())?;
            }
        }
        match history.terminal_event() {
            Some(event) if event.event_type() == EventType::WorkflowCompleted => {
                Ok(event.get("result").cloned().unwrap_or(Value::Null))
            }
            Some(event) => Err(EngineError::ExecutionFailed(
                event
                    .get_string("failure")
                    .unwrap_or("workflow failed")
                    .to_string(),
            )),
            None => Err(EngineError::MissingResult),
        }
    }
}

/// Builds ordered histories for tests without hand-numbering every event.
///
/// Event ids start at 1 and advance by one unless pinned with the `_at`
/// variants.
///
/// # Example
///
/// ```ignore
/// use wfdbg_sdk::testing::HistoryBuilder;
/// use serde_json::json;
///
/// let history = HistoryBuilder::new()
///     .started()
///     .task_boundary_at(9)
///     .completed(json!({"paid": true}))
///     .build();
/// assert_eq!(history.task_boundaries().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    events: Vec<HistoryEvent>,
    next_id: EventIndex,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Append an event at the next id.
    pub fn event(self, event_type: EventType, attributes: Value) -> Self {
        let id = self.next_id;
        self.event_at(id, event_type, attributes)
    }

    /// Append an event at a pinned id; later events continue from there.
    pub fn event_at(mut self, id: EventIndex, event_type: EventType, attributes: Value) -> Self {
        self.events
            .push(HistoryEvent::new(id, event_type, attributes).with_timestamp(Utc::now()));
        self.next_id = id + 1;
        self
    }

    /// Append a workflow-started event.
    pub fn started(self) -> Self {
        self.event(EventType::WorkflowStarted, json!({}))
    }

    /// Append a task boundary at the next id.
    pub fn task_boundary(self) -> Self {
        self.event(EventType::TaskStarted, json!({}))
    }

    /// Append a task boundary at a pinned id.
    pub fn task_boundary_at(self, id: EventIndex) -> Self {
        self.event_at(id, EventType::TaskStarted, json!({}))
    }

    /// Append an activity scheduled/completed pair.
    pub fn activity(self, activity_id: &str) -> Self {
        self.event(EventType::ActivityScheduled, json!({"activityId": activity_id}))
            .event(EventType::ActivityCompleted, json!({"activityId": activity_id}))
    }

    /// Append a successful terminal event carrying `result`.
    pub fn completed(self, result: Value) -> Self {
        self.event(EventType::WorkflowCompleted, json!({"result": result}))
    }

    /// Append a failed terminal event.
    pub fn failed(self, failure: &str) -> Self {
        self.event(EventType::WorkflowFailed, json!({"failure": failure}))
    }

    /// Build the validated history.
    ///
    /// # Panics
    ///
    /// Panics when the accumulated events violate history invariants
    /// (empty, or ids not strictly increasing).
    pub fn build(self) -> WorkflowHistory {
        WorkflowHistory::from_events(self.events).expect("builder produced an invalid history")
    }
}
