//! Control-side handle for a replay session

use crate::breakpoint::BreakpointRegistry;
use crate::coordinator::{SessionPhase, SuspendCoordinator};
use tokio::sync::watch;
use wfdbg_core::EventIndex;

/// Debugger-side handle: resume, cancel, and observe pauses.
///
/// Cheap to clone; all clones control the same session. This is the seam a
/// breakpoint-control transport drives, such as a terminal loop in
/// standalone mode or a test harness.
#[derive(Debug, Clone)]
pub struct SessionController {
    coordinator: SuspendCoordinator,
    breakpoints: BreakpointRegistry,
    phases: watch::Receiver<SessionPhase>,
}

impl SessionController {
    pub(crate) fn new(coordinator: SuspendCoordinator, breakpoints: BreakpointRegistry) -> Self {
        let phases = coordinator.subscribe();
        Self {
            coordinator,
            breakpoints,
            phases,
        }
    }

    /// Release the currently suspended boundary.
    ///
    /// No-op when nothing is suspended; returns whether a suspension was
    /// released.
    pub fn resume(&self) -> bool {
        self.coordinator.resume()
    }

    /// Cancel the session, unblocking any outstanding suspension.
    pub fn cancel(&self) {
        self.coordinator.cancel()
    }

    /// The boundary replay is currently suspended at, if any.
    pub fn paused(&self) -> Option<EventIndex> {
        self.coordinator.paused_index()
    }

    /// The session's current phase.
    pub fn phase(&self) -> SessionPhase {
        self.coordinator.phase()
    }

    /// The session's breakpoint registry, for live mutation.
    pub fn breakpoints(&self) -> &BreakpointRegistry {
        &self.breakpoints
    }

    /// Wait until replay suspends, returning the paused boundary, or `None`
    /// once the session terminates without (another) pause.
    pub async fn wait_for_pause(&self) -> Option<EventIndex> {
        let mut phases = self.phases.clone();
        loop {
            match *phases.borrow_and_update() {
                SessionPhase::Paused(index) => return Some(index),
                SessionPhase::Terminated => return None,
                SessionPhase::Running => {}
            }
            if phases.changed().await.is_err() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (SuspendCoordinator, SessionController) {
        let coordinator = SuspendCoordinator::new();
        let controller = SessionController::new(coordinator.clone(), BreakpointRegistry::new());
        (coordinator, controller)
    }

    #[test]
    fn test_resume_is_idempotent() {
        let (_, controller) = controller();
        assert!(!controller.resume());
        assert!(!controller.resume());
    }

    #[tokio::test]
    async fn test_wait_for_pause_sees_suspension() {
        let (coordinator, controller) = controller();

        let replay = tokio::task::spawn_blocking(move || {
            let token = coordinator.begin_suspend(9).unwrap();
            token.wait()
        });

        assert_eq!(controller.wait_for_pause().await, Some(9));
        assert!(controller.resume());
        replay.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_pause_ends_on_termination() {
        let (coordinator, controller) = controller();
        coordinator.finish();
        assert_eq!(controller.wait_for_pause().await, None);
    }

    #[tokio::test]
    async fn test_cancel_terminates_waiters() {
        let (_, controller) = controller();
        let waiter = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.wait_for_pause().await })
        };
        controller.cancel();
        assert_eq!(waiter.await.unwrap(), None);
    }
}
