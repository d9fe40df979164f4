// Host-side tests for tuning constants and their relationships.

use groove_glide_ui::core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn travel_and_drag_constants_are_sane() {
    assert!(VALUE_MAX > VALUE_MIN);
    assert_eq!(VALUE_MAX - VALUE_MIN, 100.0);
    assert!(DRAG_SENSITIVITY > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sway_limits_keep_their_direction() {
    // low values sway wider, high values sway slower
    assert!(SWAY_AMPLITUDE_MAX_DEG > SWAY_AMPLITUDE_MIN_DEG);
    assert!(SWAY_AMPLITUDE_MIN_DEG >= 0.0);
    assert_eq!(SWAY_SPEED_MIN, 1.0);
    assert_eq!(SWAY_SPEED_MAX, 8.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bpm_bounds_contain_default() {
    assert!(BPM_MIN > 0.0);
    assert!(BPM_MIN <= DEFAULT_BPM && DEFAULT_BPM <= BPM_MAX);
}

#[test]
fn palette_is_css_hex() {
    assert!(!CROWD_PALETTE.is_empty());
    for c in CROWD_PALETTE {
        assert!(c.starts_with('#') && c.len() == 7, "{}", c);
    }
}
