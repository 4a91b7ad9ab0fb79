//! Boundary interception: decides at each task boundary whether replay pauses

use crate::breakpoint::BreakpointRegistry;
use crate::coordinator::SuspendCoordinator;
use crate::transport::DebugSession;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use wfdbg_core::{EngineError, EventIndex, ReplayInterceptor};

/// Hook object registered with the external replay engine.
///
/// At each task boundary it consults the breakpoint registry and, when a
/// debugger session is attached, the session's live pause signal. On a hit
/// it suspends the replay context through the [`SuspendCoordinator`] until
/// the control side resumes; otherwise it returns immediately.
pub struct BoundaryInterceptor {
    breakpoints: BreakpointRegistry,
    coordinator: SuspendCoordinator,
    debugger: Option<Arc<dyn DebugSession>>,
    /// Highest boundary evaluated so far. One workflow task can surface
    /// several hook invocations at the same history length; only the first
    /// advance counts.
    last_boundary: AtomicI64,
}

impl BoundaryInterceptor {
    pub fn new(
        breakpoints: BreakpointRegistry,
        coordinator: SuspendCoordinator,
        debugger: Option<Arc<dyn DebugSession>>,
    ) -> Self {
        Self {
            breakpoints,
            coordinator,
            debugger,
            last_boundary: AtomicI64::new(0),
        }
    }

    fn should_pause(&self, index: EventIndex) -> bool {
        if self.breakpoints.contains(index) {
            return true;
        }
        self.debugger
            .as_ref()
            .is_some_and(|session| session.pause_requested(index))
    }
}

impl ReplayInterceptor for BoundaryInterceptor {
    fn on_task_boundary(&self, index: EventIndex) -> Result<(), EngineError> {
        if index <= self.last_boundary.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.last_boundary.store(index, Ordering::SeqCst);

        if !self.should_pause(index) {
            return Ok(());
        }

        let token = self.coordinator.begin_suspend(index)?;
        if let Some(session) = &self.debugger {
            session.on_paused(index);
        }
        info!(event_id = index, "replay suspended at task boundary");
        token.wait()?;
        debug!(event_id = index, "replay resumed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::thread;
    use std::time::Duration;
    use wfdbg_core::{SessionCancelled, WorkflowHistory};

    struct ScriptedSession {
        pause_at: Vec<EventIndex>,
        paused_notifications: Mutex<Vec<EventIndex>>,
    }

    impl ScriptedSession {
        fn new(pause_at: Vec<EventIndex>) -> Self {
            Self {
                pause_at,
                paused_notifications: Mutex::new(Vec::new()),
            }
        }
    }

    impl DebugSession for ScriptedSession {
        fn fetch_history(&self) -> crate::error::Result<WorkflowHistory> {
            unimplemented!("not used by interceptor tests")
        }

        fn pause_requested(&self, index: EventIndex) -> bool {
            self.pause_at.contains(&index)
        }

        fn on_paused(&self, index: EventIndex) {
            self.paused_notifications.lock().push(index);
        }
    }

    fn auto_resume(coordinator: &SuspendCoordinator) -> thread::JoinHandle<()> {
        let coordinator = coordinator.clone();
        thread::spawn(move || loop {
            if coordinator.paused_index().is_some() {
                coordinator.resume();
                break;
            }
            thread::sleep(Duration::from_millis(2));
        })
    }

    #[test]
    fn test_non_breakpoint_boundary_passes_through() {
        let interceptor = BoundaryInterceptor::new(
            BreakpointRegistry::new(),
            SuspendCoordinator::new(),
            None,
        );
        interceptor.on_task_boundary(1).unwrap();
        interceptor.on_task_boundary(9).unwrap();
    }

    #[test]
    fn test_breakpoint_hit_suspends_until_resumed() {
        let breakpoints = BreakpointRegistry::new();
        breakpoints.set([9]);
        let coordinator = SuspendCoordinator::new();
        let interceptor = BoundaryInterceptor::new(breakpoints, coordinator.clone(), None);

        let resumer = auto_resume(&coordinator);
        interceptor.on_task_boundary(9).unwrap();
        resumer.join().unwrap();
        assert_eq!(coordinator.paused_index(), None);
    }

    #[test]
    fn test_repeated_boundary_is_evaluated_once() {
        let breakpoints = BreakpointRegistry::new();
        breakpoints.set([5]);
        let coordinator = SuspendCoordinator::new();
        let interceptor = BoundaryInterceptor::new(breakpoints, coordinator.clone(), None);

        let resumer = auto_resume(&coordinator);
        interceptor.on_task_boundary(5).unwrap();
        resumer.join().unwrap();

        // Same history length again: must not suspend a second time.
        interceptor.on_task_boundary(5).unwrap();
        interceptor.on_task_boundary(4).unwrap();
        assert_eq!(coordinator.paused_index(), None);
    }

    #[test]
    fn test_cancelled_session_aborts_boundary() {
        let breakpoints = BreakpointRegistry::new();
        breakpoints.set([9]);
        let coordinator = SuspendCoordinator::new();
        coordinator.cancel();
        let interceptor = BoundaryInterceptor::new(breakpoints, coordinator, None);

        let err = interceptor.on_task_boundary(9).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Interrupted(SessionCancelled { index: 9 })
        ));
    }

    #[test]
    fn test_live_session_pause_request_suspends() {
        let session = Arc::new(ScriptedSession::new(vec![7]));
        let coordinator = SuspendCoordinator::new();
        let interceptor = BoundaryInterceptor::new(
            BreakpointRegistry::new(),
            coordinator.clone(),
            Some(session.clone()),
        );

        interceptor.on_task_boundary(3).unwrap();

        let resumer = auto_resume(&coordinator);
        interceptor.on_task_boundary(7).unwrap();
        resumer.join().unwrap();

        assert_eq!(*session.paused_notifications.lock(), vec![7]);
    }
}
