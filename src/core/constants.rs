//! Knob and crowd tuning constants.
//!
//! These express intended behavior (travel range, drag feel, sway limits) and
//! keep magic numbers out of the controller and animation code.

use super::mapper::RotationRange;

// Page element ids
pub const KNOB_ELEMENT_ID: &str = "impact-knob";
pub const CROWD_CONTAINER_ID: &str = "crowd";
pub const BPM_INPUT_ID: &str = "bpm-input";

// Parameter travel (display units, "percent of travel")
pub const VALUE_MIN: f32 = 0.0;
pub const VALUE_MAX: f32 = 100.0;

// Interaction
pub const DRAG_SENSITIVITY: f32 = 0.5; // value units per pixel of vertical drag

// Knob face. SYMMETRIC is what the shipped page uses; CLOCKWISE is the
// rest-position variant of the artwork.
pub const KNOB_ROTATION_RANGE: RotationRange = RotationRange::SYMMETRIC;
pub const KNOB_ACTIVE_CLASS: &str = "active";

// Crowd layer
pub const CROWD_SPRITE_COUNT: usize = 250;
pub const SWAY_AMPLITUDE_MAX_DEG: f32 = 25.0; // sway at value 0
pub const SWAY_AMPLITUDE_MIN_DEG: f32 = 5.0; // sway at value 100
pub const SWAY_SPEED_MIN: f32 = 1.0; // speed multiplier at value 0
pub const SWAY_SPEED_MAX: f32 = 8.0; // speed multiplier at value 100

// Tempo
pub const DEFAULT_BPM: f32 = 120.0;
pub const BPM_MIN: f32 = 20.0;
pub const BPM_MAX: f32 = 300.0;

// Sprite colors, picked at random per sprite
pub const CROWD_PALETTE: [&str; 5] = [
    "#ff4d6d", // pink
    "#ffd166", // yellow
    "#06d6a0", // green
    "#4cc9f0", // cyan
    "#b388ff", // violet
];

// DOM markup for sprites
pub const SPRITE_CLASS: &str = "crowd-member";
