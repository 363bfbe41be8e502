// Host-side tests for the web shell's tuning constants and helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(CLICK_SLOP_PX > 0.0 && CLICK_SLOP_PX < 20.0);
    assert!(WHEEL_LINE_PX > 1.0);
    assert!(WHEEL_PAGE_PX > WHEEL_LINE_PX);
    assert!(CHIME_GAIN > 0.0 && CHIME_GAIN <= 0.5);
    assert!(CHIME_ATTACK_SEC < CHIME_DURATION_SEC);
}

#[test]
fn chime_walks_up_the_scale_and_wraps() {
    assert!((chime_hz(0) - CHIME_BASE_HZ).abs() < 1e-3);
    for i in 0..9 {
        assert!(chime_hz(i + 1) > chime_hz(i), "step {i} should rise");
    }
    // One octave up after a full pass of the scale.
    let octave = chime_hz(CHIME_SCALE.len());
    assert!((octave - 2.0 * CHIME_BASE_HZ).abs() < 1e-2);
    assert_eq!(chime_hz(0), chime_hz(CHIME_SCALE.len() * 2));
}

#[test]
fn wheel_modes_normalize_to_pixels() {
    assert_eq!(wheel_pixels(53.0, 0), 53.0);
    assert_eq!(wheel_pixels(3.0, 1), 3.0 * WHEEL_LINE_PX);
    assert_eq!(wheel_pixels(-1.0, 2), -WHEEL_PAGE_PX);
}
