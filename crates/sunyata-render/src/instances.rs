//! CPU-side packing of scene data into GPU layouts. Kept free of device
//! handles so it can be tested without a GPU.

use glam::Vec3;
use sunyata_core::{Camera, Scene};

/// Two triangles spanning a unit quad centered on the sprite.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
}

impl SceneUniforms {
    /// View-projection plus the camera basis the vertex shader uses to
    /// face sprites toward the viewer.
    pub fn from_camera(camera: &Camera) -> Self {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let mut right = forward.cross(camera.up).normalize_or_zero();
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        let up = right.cross(forward).normalize_or_zero();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        }
    }
}

/// Flattens every drawn sprite into `out`, keeping at most `max`.
/// Returns how many were dropped by the cap.
pub fn pack_sprites(scene: &Scene, out: &mut Vec<SpriteInstance>, max: usize) -> usize {
    out.clear();
    let mut dropped = 0;
    scene.for_each_world_sprite(|s| {
        if out.len() < max {
            out.push(SpriteInstance {
                pos: s.position.to_array(),
                size: s.size,
                color: s.color.to_array(),
            });
        } else {
            dropped += 1;
        }
    });
    dropped
}
