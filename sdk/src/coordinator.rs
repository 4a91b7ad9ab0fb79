//! Suspend/resume rendezvous between the replay context and the control side
//!
//! Each suspension is a single-use rendezvous: a fresh
//! [`tokio::sync::oneshot`] pair whose sender is parked with the
//! coordinator and whose receiver rides in the [`SuspendToken`] held by the
//! suspending side. The one-shot buffers a resume issued before the waiter
//! blocks, so there is no lost-wakeup window.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use wfdbg_core::{EventIndex, SessionCancelled};

/// Where a replay session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Replay is progressing (or has not started yet)
    Running,
    /// Replay is suspended at the given task boundary
    Paused(EventIndex),
    /// Replay finished, failed, or the session was cancelled
    Terminated,
}

/// The resume half of one pending suspension.
#[derive(Debug)]
struct Pending {
    index: EventIndex,
    resume_tx: oneshot::Sender<()>,
}

#[derive(Debug)]
struct CoordinatorInner {
    /// At most one suspension is outstanding per session: the engine drives
    /// one logical replay context per run.
    slot: Mutex<Option<Pending>>,
    cancelled: AtomicBool,
    phase_tx: watch::Sender<SessionPhase>,
}

/// One paused task boundary.
///
/// Created by [`SuspendCoordinator::begin_suspend`] when a breakpoint hits;
/// consumed by [`SuspendToken::wait`]; destroyed when resumed or when the
/// session is cancelled.
#[derive(Debug)]
pub struct SuspendToken {
    index: EventIndex,
    resume_rx: oneshot::Receiver<()>,
}

impl SuspendToken {
    /// The boundary this token suspends.
    pub fn index(&self) -> EventIndex {
        self.index
    }

    /// Block the calling context until the matching resume arrives.
    ///
    /// Fails with [`SessionCancelled`] when the session is cancelled
    /// instead. Must be called on the engine's replay context, never inside
    /// an async runtime.
    pub fn wait(self) -> Result<(), SessionCancelled> {
        match self.resume_rx.blocking_recv() {
            Ok(()) => Ok(()),
            // The sender was dropped without resuming: cancellation.
            Err(_) => Err(SessionCancelled { index: self.index }),
        }
    }
}

/// Synchronization primitive shared between the suspending interceptor and
/// the resuming control transport.
///
/// Cheap to clone; clones coordinate the same session.
#[derive(Debug, Clone)]
pub struct SuspendCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl Default for SuspendCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspendCoordinator {
    pub fn new() -> Self {
        let (phase_tx, _) = watch::channel(SessionPhase::Running);
        Self {
            inner: Arc::new(CoordinatorInner {
                slot: Mutex::new(None),
                cancelled: AtomicBool::new(false),
                phase_tx,
            }),
        }
    }

    /// Register a suspension at `index` and hand back its token.
    ///
    /// The resume half is registered before this returns, so a resume
    /// issued at any point after is observed by [`SuspendToken::wait`].
    /// Fails immediately when the session is already cancelled.
    pub fn begin_suspend(&self, index: EventIndex) -> Result<SuspendToken, SessionCancelled> {
        let (resume_tx, resume_rx) = oneshot::channel();
        {
            let mut slot = self.inner.slot.lock();
            if self.inner.cancelled.load(Ordering::SeqCst) {
                return Err(SessionCancelled { index });
            }
            debug_assert!(slot.is_none(), "one suspension outstanding per session");
            *slot = Some(Pending { index, resume_tx });
        }
        self.inner.phase_tx.send_replace(SessionPhase::Paused(index));
        Ok(SuspendToken { index, resume_rx })
    }

    /// Release the outstanding suspension, if any.
    ///
    /// Idempotent: resuming when nothing is suspended (already resumed,
    /// never suspended, or a duplicate external signal) is a no-op.
    /// Returns whether a suspension was released.
    pub fn resume(&self) -> bool {
        let pending = self.inner.slot.lock().take();
        match pending {
            Some(pending) => {
                // The waiter may already be gone; the signal is then moot.
                let _ = pending.resume_tx.send(());
                if !self.inner.cancelled.load(Ordering::SeqCst) {
                    self.inner.phase_tx.send_replace(SessionPhase::Running);
                }
                true
            }
            None => false,
        }
    }

    /// Cancel the session.
    ///
    /// Unblocks an outstanding suspension promptly (its `wait` fails with
    /// [`SessionCancelled`]) and fails all future suspends fast.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        // Dropping the sender wakes the receiver with an error.
        let pending = self.inner.slot.lock().take();
        drop(pending);
        self.inner.phase_tx.send_replace(SessionPhase::Terminated);
    }

    /// Mark the session finished and invalidate any leftover state.
    pub fn finish(&self) {
        let pending = self.inner.slot.lock().take();
        drop(pending);
        self.inner.phase_tx.send_replace(SessionPhase::Terminated);
    }

    /// The boundary replay is currently suspended at, if any.
    pub fn paused_index(&self) -> Option<EventIndex> {
        self.inner.slot.lock().as_ref().map(|p| p.index)
    }

    /// Check whether the session has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// The session's current phase.
    pub fn phase(&self) -> SessionPhase {
        *self.inner.phase_tx.borrow()
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.inner.phase_tx.subscribe()
    }
}
