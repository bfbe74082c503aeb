use crate::controller::scheduler::{FrameHandle, FrameScheduler, FrameToken};
use crate::foundation::core::Point;
use crate::wave::animator::Direction;

/// Identifier of one activation-to-completion run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

/// Ephemeral state of one transition run.
///
/// Owned by the controller; superseded sessions are cancelled, never resumed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Session {
    id: SessionId,
    direction: Direction,
    started_at_ms: f64,
    entry: Point,
    pending: Option<FrameHandle>,
}

impl Session {
    /// Create a session and schedule its first frame.
    pub fn start(
        id: SessionId,
        direction: Direction,
        entry: Point,
        now_ms: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Self {
        let pending = Some(scheduler.request_frame(id));
        Self {
            id,
            direction,
            started_at_ms: now_ms,
            entry,
            pending,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Sweep direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Entry point the distance field was anchored on.
    pub fn entry(&self) -> Point {
        self.entry
    }

    /// Host timestamp the session started at.
    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    /// Elapsed time at `now_ms`, never negative.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at_ms).max(0.0)
    }

    /// Pending frame handle, if a callback is outstanding.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Whether `token` is the callback this session is waiting for.
    pub fn owns(&self, token: FrameToken) -> bool {
        token.session == self.id && self.pending == Some(token.handle)
    }

    /// Mark the outstanding callback as delivered.
    pub fn frame_fired(&mut self) {
        self.pending = None;
    }

    /// Chain the next frame.
    pub fn schedule_next(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.pending = Some(scheduler.request_frame(self.id));
    }

    /// Cancel any outstanding callback.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}
