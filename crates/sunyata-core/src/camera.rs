//! Camera description and the damped orbit controller.
//!
//! These types avoid platform APIs so both the web and native front-ends
//! can build view/projection matrices and screen rays from them.

use crate::constants::{
    CAMERA_DAMPING_PER_SEC, CAMERA_DEFAULT_DISTANCE, CAMERA_MAX_DISTANCE, CAMERA_MAX_PITCH,
    CAMERA_MIN_DISTANCE,
};
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device
    /// coordinates (`x`, `y` in `[-1, 1]`, y up).
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize_or_zero();
        (self.eye, rd)
    }
}

/// Orbit controller: the user sets goals, `update` eases toward them.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    home_distance: f32,
    aspect: f32,
    pub fovy_radians: f32,
    /// Slow automatic rotation in radians per second; 0 disables it.
    pub auto_rotate: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CAMERA_DEFAULT_DISTANCE)
    }
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        let distance = distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.15,
            distance,
            goal_yaw: 0.0,
            goal_pitch: 0.15,
            goal_distance: distance,
            home_distance: distance,
            aspect: 16.0 / 9.0,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            auto_rotate: 0.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotate the goal orientation by the given angles in radians.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.goal_yaw += d_yaw;
        self.goal_pitch = (self.goal_pitch + d_pitch).clamp(-CAMERA_MAX_PITCH, CAMERA_MAX_PITCH);
    }

    /// Multiply the goal distance; values below 1 move closer.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.goal_distance =
                (self.goal_distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.goal_distance = distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Snap back to the framing given to `new`. Aspect, field of view and
    /// auto-rotation are kept.
    pub fn reset(&mut self) {
        *self = Self {
            aspect: self.aspect,
            fovy_radians: self.fovy_radians,
            auto_rotate: self.auto_rotate,
            ..Self::new(self.home_distance)
        };
    }

    /// Ease the current orientation toward the goals. Runs every frame,
    /// including while the simulation is paused.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.goal_yaw += self.auto_rotate * dt;
        let alpha = 1.0 - (-CAMERA_DAMPING_PER_SEC * dt).exp();
        self.yaw += (self.goal_yaw - self.yaw) * alpha;
        self.pitch += (self.goal_pitch - self.pitch) * alpha;
        self.distance += (self.goal_distance - self.distance) * alpha;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: self.fovy_radians,
            znear: 0.1,
            zfar: 200.0,
        }
    }

    /// Ray through a pixel of a `width` x `height` viewport (origin top-left).
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        self.camera().ndc_ray(ndc_x, ndc_y)
    }
}
