//! Conversions between the knob's display value, its rotation angle and the
//! host's normalized unit.
//!
//! All functions are pure arithmetic. Callers clamp with [`clamp_value`]
//! before mapping; nothing here rejects out-of-range input.

use super::constants::{VALUE_MAX, VALUE_MIN};

/// Angular travel of the knob face, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationRange {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl RotationRange {
    /// 270° sweep centered at the top: 0 sits bottom-left, 100 bottom-right.
    pub const SYMMETRIC: RotationRange = RotationRange {
        min_deg: -135.0,
        max_deg: 135.0,
    };

    /// 300° sweep starting from the artwork's rest position.
    pub const CLOCKWISE: RotationRange = RotationRange {
        min_deg: 0.0,
        max_deg: 300.0,
    };

    #[inline]
    pub fn span(&self) -> f32 {
        self.max_deg - self.min_deg
    }
}

impl Default for RotationRange {
    fn default() -> Self {
        Self::SYMMETRIC
    }
}

#[inline]
pub fn value_to_rotation(value: f32, range: RotationRange) -> f32 {
    range.min_deg + (value / VALUE_MAX) * range.span()
}

/// Inverse of [`value_to_rotation`]. A zero-width range maps everything to 0.
#[inline]
pub fn rotation_to_value(degrees: f32, range: RotationRange) -> f32 {
    let span = range.span();
    if span == 0.0 {
        return VALUE_MIN;
    }
    ((degrees - range.min_deg) / span) * VALUE_MAX
}

#[inline]
pub fn value_to_normalized(value: f32) -> f32 {
    value / VALUE_MAX
}

#[inline]
pub fn normalized_to_value(normalized: f32) -> f32 {
    normalized * VALUE_MAX
}

/// Clamp into the display range. NaN collapses to the minimum.
#[inline]
pub fn clamp_value(value: f32) -> f32 {
    if value.is_nan() {
        return VALUE_MIN;
    }
    value.clamp(VALUE_MIN, VALUE_MAX)
}

/// CSS transform for a rotation in degrees.
pub fn rotate_transform(degrees: f32) -> String {
    format!("rotate({}deg)", degrees)
}
