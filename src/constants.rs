/// Web shell tuning constants: pointer handling and the verse chime.
///
/// Simulation and camera tuning lives in `sunyata_core::constants`; these
/// only shape how the browser feeds input and sound.

// Pointer
pub const CLICK_SLOP_PX: f32 = 4.0; // presses that move less than this count as clicks
pub const WHEEL_LINE_PX: f32 = 16.0; // WheelEvent.deltaMode == 1 (lines) to pixels
pub const WHEEL_PAGE_PX: f32 = 400.0; // deltaMode == 2 (pages)

// Chime on verse change
pub const CHIME_BASE_HZ: f32 = 220.0; // A3
pub const CHIME_SCALE: [f32; 5] = [0.0, 2.0, 4.0, 7.0, 9.0]; // major pentatonic, semitones
pub const CHIME_GAIN: f32 = 0.12;
pub const CHIME_ATTACK_SEC: f64 = 0.02;
pub const CHIME_DURATION_SEC: f64 = 1.6;

/// Pitch for the verse at `index`: walks up the pentatonic scale and
/// wraps after two octaves.
#[inline]
pub fn chime_hz(index: usize) -> f32 {
    let steps = CHIME_SCALE.len();
    let i = index % (steps * 2);
    let semis = CHIME_SCALE[i % steps] + 12.0 * (i / steps) as f32;
    CHIME_BASE_HZ * 2f32.powf(semis / 12.0)
}

/// Normalizes `WheelEvent.deltaY` to pixels.
#[inline]
pub fn wheel_pixels(delta_y: f64, delta_mode: u32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        1 => d * WHEEL_LINE_PX,
        2 => d * WHEEL_PAGE_PX,
        _ => d,
    }
}
