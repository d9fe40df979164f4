//! Decorative crowd: a batch of sprites that sway to the tempo.
//!
//! Sway is a pure function of wall-clock time, BPM, each sprite's phase and
//! the knob value. Higher values give a narrower but slower sway; both
//! interpolations run in that direction on purpose.

use super::constants::{
    BPM_MAX, BPM_MIN, CROWD_PALETTE, CROWD_SPRITE_COUNT, DEFAULT_BPM, SWAY_AMPLITUDE_MAX_DEG,
    SWAY_AMPLITUDE_MIN_DEG, SWAY_SPEED_MAX, SWAY_SPEED_MIN, VALUE_MAX,
};
use super::mapper::clamp_value;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct CrowdConfig {
    pub count: usize,
    pub bpm: f32,
    pub amplitude_max_deg: f32,
    pub amplitude_min_deg: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            count: CROWD_SPRITE_COUNT,
            bpm: DEFAULT_BPM,
            amplitude_max_deg: SWAY_AMPLITUDE_MAX_DEG,
            amplitude_min_deg: SWAY_AMPLITUDE_MIN_DEG,
            speed_min: SWAY_SPEED_MIN,
            speed_max: SWAY_SPEED_MAX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Sprite {
    pub position: Vec2,
    /// Radians in [0, 2π).
    pub phase: f32,
    /// Initial lean, +1 or -1. Superseded by the first frame.
    pub direction: f32,
    pub color: &'static str,
}

#[inline]
pub fn beat_interval_ms(bpm: f32) -> f64 {
    (60.0 / bpm as f64) * 1000.0
}

#[inline]
pub fn clamp_bpm(bpm: f32) -> f32 {
    if bpm.is_nan() {
        return DEFAULT_BPM;
    }
    bpm.clamp(BPM_MIN, BPM_MAX)
}

/// Degrees of sway; `amplitude_max_deg` at 0 falling to `amplitude_min_deg` at 100.
#[inline]
pub fn sway_amplitude(value: f32, config: &CrowdConfig) -> f32 {
    let t = clamp_value(value) / VALUE_MAX;
    config.amplitude_max_deg + (config.amplitude_min_deg - config.amplitude_max_deg) * t
}

/// Period stretch; 1x at 0 rising to 8x at 100.
#[inline]
pub fn speed_multiplier(value: f32, config: &CrowdConfig) -> f32 {
    let t = clamp_value(value) / VALUE_MAX;
    config.speed_min + (config.speed_max - config.speed_min) * t
}

/// Rotation of one sprite at `time_ms` (wall clock, milliseconds).
pub fn sway_angle(time_ms: f64, phase: f32, value: f32, config: &CrowdConfig) -> f32 {
    let beats = time_ms / beat_interval_ms(config.bpm);
    let speed = speed_multiplier(value, config) as f64;
    let arg = beats * std::f64::consts::TAU / speed + phase as f64;
    arg.sin() as f32 * sway_amplitude(value, config)
}

pub struct Crowd {
    pub config: CrowdConfig,
    sprites: Vec<Sprite>,
    rng: StdRng,
}

impl Crowd {
    pub fn new(config: CrowdConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: CrowdConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut config: CrowdConfig, rng: StdRng) -> Self {
        config.bpm = clamp_bpm(config.bpm);
        Self {
            config,
            sprites: Vec::new(),
            rng,
        }
    }

    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn set_bpm(&mut self, bpm: f32) -> f32 {
        self.config.bpm = clamp_bpm(bpm);
        self.config.bpm
    }

    /// Discard the current batch and scatter a fresh one over `bounds`
    /// (width, height in CSS pixels).
    pub fn generate(&mut self, bounds: Vec2) {
        let bounds = bounds.max(Vec2::ZERO);
        let rng = &mut self.rng;
        self.sprites = (0..self.config.count)
            .map(|_| Sprite {
                position: Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
                phase: rng.gen_range(0.0..TAU),
                direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                color: CROWD_PALETTE[rng.gen_range(0..CROWD_PALETTE.len())],
            })
            .collect();
    }

    pub fn angle_of(&self, sprite: &Sprite, time_ms: f64, value: f32) -> f32 {
        sway_angle(time_ms, sprite.phase, value, &self.config)
    }
}
