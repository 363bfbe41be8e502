// Shared visual and timing constants used by both web and native frontends.

// Frame clock
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; longer gaps (hidden tab) are clamped
pub const FPS_LOG_INTERVAL_FRAMES: u64 = 600;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 3.0;

// Camera
pub const CAMERA_DEFAULT_DISTANCE: f32 = 9.0;
pub const CAMERA_MIN_DISTANCE: f32 = 3.0;
pub const CAMERA_MAX_DISTANCE: f32 = 30.0;
pub const CAMERA_MAX_PITCH: f32 = 1.45; // just under pi/2 so the up vector stays valid
pub const CAMERA_DAMPING_PER_SEC: f32 = 6.0;
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.006;
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.0015;

// Picking
pub const PICK_SCALE: f32 = 1.6; // picking radius relative to drawn sprite radius

// Renderer
pub const MAX_SPRITES: usize = 16_384;

// Default palette (linear RGB)
pub const COLOR_WAVE: [f32; 3] = [0.25, 0.55, 1.0];
pub const COLOR_PARTICLE: [f32; 3] = [1.0, 0.78, 0.35];
pub const COLOR_UP: [f32; 3] = [0.35, 0.85, 1.0];
pub const COLOR_DOWN: [f32; 3] = [1.0, 0.35, 0.55];
pub const COLOR_BARRIER: [f32; 3] = [0.6, 0.6, 0.7];
pub const COLOR_ENV: [f32; 3] = [0.9, 0.45, 0.2];

#[inline]
pub fn rgba(rgb: [f32; 3], alpha: f32) -> glam::Vec4 {
    glam::Vec4::new(rgb[0], rgb[1], rgb[2], alpha)
}
