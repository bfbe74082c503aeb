use std::collections::BTreeMap;

use crate::controller::session::SessionId;

/// Opaque handle to a scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// What the host passes back when a scheduled frame fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken {
    /// Handle returned by [`FrameScheduler::request_frame`].
    pub handle: FrameHandle,
    /// Session the frame was requested for.
    pub session: SessionId,
}

/// Host animation-frame scheduler, in the spirit of `requestAnimationFrame`.
///
/// Each request corresponds to exactly one future callback, delivered by the host as
/// [`crate::TransitionController::on_frame`] with the matching [`FrameToken`].
pub trait FrameScheduler {
    /// Schedule one frame callback for `session`.
    fn request_frame(&mut self, session: SessionId) -> FrameHandle;
    /// Cancel a pending callback. Cancelling an already fired or unknown handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic in-memory scheduler: requests queue up until the driver takes them.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: BTreeMap<FrameHandle, SessionId>,
    cancelled: u64,
}

impl ManualScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(handle, session)| FrameToken { handle, session })
            .collect()
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Number of requests waiting to fire.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// How many pending callbacks were cancelled over the scheduler's lifetime.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, session: SessionId) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.insert(handle, session);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle).is_some() {
            self.cancelled += 1;
        }
    }
}
