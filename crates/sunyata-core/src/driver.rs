//! Platform-agnostic pieces of the render loop.
//!
//! The platform schedules frames (requestAnimationFrame, winit redraws);
//! each frame it asks [`FrameClock`] for `dt` and hands it to
//! [`crate::App::tick`] together with a [`FrameSink`] that draws.

use crate::camera::Camera;
use crate::scene::Scene;
use instant::Instant;

/// Anything that can turn the scene into pixels.
pub trait FrameSink {
    type Error;

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

/// Monotonic frame timer with a clamp on long gaps.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
    frames: u64,
    smoothed_fps: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: None,
            max_dt: max_dt.max(0.0),
            frames: 0,
            smoothed_fps: 60.0,
        }
    }

    /// Seconds since the previous call, clamped. The first call returns 0.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = match self.last {
            Some(prev) => (now - prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        self.frames += 1;
        if raw > 0.0 {
            self.smoothed_fps = self.smoothed_fps * 0.95 + (1.0 / raw) * 0.05;
        }
        self.clamp_dt(raw)
    }

    pub fn clamp_dt(&self, raw: f32) -> f32 {
        if raw.is_finite() {
            raw.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
