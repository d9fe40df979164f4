//! Restartable per-frame task.
//!
//! The loop owns at most one pending frame request. Starting cancels the
//! previous request first, and cancelling an idle loop does nothing, so
//! repeated resizes never stack up concurrent loops.

use super::bridge::KnobError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Display-refresh scheduler (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    fn request_frame(&self) -> Result<FrameHandle, KnobError>;

    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> Result<(), KnobError> {
        self.cancel(scheduler);
        self.pending = Some(scheduler.request_frame()?);
        Ok(())
    }

    /// Consume the pending request at the top of a frame callback. False
    /// means the loop was cancelled and the frame must not draw.
    pub fn begin_frame(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}
