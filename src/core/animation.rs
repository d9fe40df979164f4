//! Crowd animation driver: sprite batch + frame loop + output sink.
//!
//! Reads the knob value each frame and writes only sprite transforms; it has
//! no path back to the parameter or the bridge.

use super::bridge::KnobError;
use super::crowd::{Crowd, Sprite};
use super::frame_loop::{FrameLoop, FrameScheduler};
use glam::Vec2;

/// Where sprite transforms land (DOM nodes on the web).
pub trait SpriteSink {
    /// Replace every sprite node with a fresh batch.
    fn rebuild(&mut self, sprites: &[Sprite]);

    fn set_sway(&mut self, index: usize, degrees: f32);

    fn clear(&mut self) {}
}

pub struct CrowdAnimation<S: FrameScheduler, K: SpriteSink> {
    crowd: Crowd,
    frame_loop: FrameLoop,
    scheduler: S,
    sink: K,
    regenerations: u64,
}

impl<S: FrameScheduler, K: SpriteSink> CrowdAnimation<S, K> {
    pub fn new(crowd: Crowd, scheduler: S, sink: K) -> Self {
        Self {
            crowd,
            frame_loop: FrameLoop::default(),
            scheduler,
            sink,
            regenerations: 0,
        }
    }

    pub fn crowd(&self) -> &Crowd {
        &self.crowd
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// How many sprite batches have been generated since construction.
    #[inline]
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn set_bpm(&mut self, bpm: f32) -> f32 {
        let applied = self.crowd.set_bpm(bpm);
        log::info!("[crowd] bpm {:.1}", applied);
        applied
    }

    pub fn mount(&mut self, bounds: Vec2) -> Result<(), KnobError> {
        self.regenerate(bounds);
        self.frame_loop.start(&self.scheduler)?;
        log::info!(
            "[crowd] mounted {} sprites in {:.0}x{:.0}",
            self.crowd.sprites().len(),
            bounds.x,
            bounds.y
        );
        Ok(())
    }

    /// One display refresh. Skipped entirely if the loop was cancelled.
    pub fn frame(&mut self, time_ms: f64, value: f32) {
        if !self.frame_loop.begin_frame() {
            return;
        }
        for (i, sprite) in self.crowd.sprites().iter().enumerate() {
            let degrees = self.crowd.angle_of(sprite, time_ms, value);
            self.sink.set_sway(i, degrees);
        }
        if let Err(e) = self.frame_loop.start(&self.scheduler) {
            log::error!("[crowd] reschedule failed: {}", e);
        }
    }

    /// Full reset: stop the loop, scatter a new batch, restart.
    pub fn resize(&mut self, bounds: Vec2) -> Result<(), KnobError> {
        self.frame_loop.cancel(&self.scheduler);
        self.regenerate(bounds);
        self.frame_loop.start(&self.scheduler)
    }

    /// Stop the loop and remove the sprites. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.frame_loop.is_running() {
            log::info!("[crowd] unmounted");
        }
        self.frame_loop.cancel(&self.scheduler);
        self.sink.clear();
    }

    fn regenerate(&mut self, bounds: Vec2) {
        self.crowd.generate(bounds);
        self.sink.rebuild(self.crowd.sprites());
        self.regenerations += 1;
    }
}
