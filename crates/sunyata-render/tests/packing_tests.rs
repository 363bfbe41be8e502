// GPU-free checks of how the scene is packed for the sprite pipeline.

use glam::{Vec3, Vec4};
use sunyata_core::{OrbitCamera, Scene, Sprite};
use sunyata_render::{pack_sprites, SceneUniforms, SpriteInstance, QUAD_CORNERS};

fn scene_with(n: usize) -> Scene {
    let mut scene = Scene::new();
    let id = scene.add_node("test", "dots", n);
    let node = scene.node_mut(id).unwrap();
    node.transform.translation = Vec3::new(0.0, 1.0, 0.0);
    for (i, s) in node.sprites_mut().iter_mut().enumerate() {
        *s = Sprite::new(Vec3::new(i as f32, 0.0, 0.0), 0.2, Vec4::ONE);
    }
    scene
}

#[test]
fn instance_layout_matches_vertex_attributes() {
    // pos (12) + size (4) + color (16)
    assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 96);
}

#[test]
fn packs_world_space_sprites() {
    let scene = scene_with(3);
    let mut out = Vec::new();
    assert_eq!(pack_sprites(&scene, &mut out, 100), 0);
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].pos, [2.0, 1.0, 0.0]);
    assert_eq!(out[2].size, 0.2);
}

#[test]
fn cap_drops_the_excess_and_reports_it() {
    let scene = scene_with(10);
    let mut out = vec![SpriteInstance::default(); 50];
    assert_eq!(pack_sprites(&scene, &mut out, 4), 6);
    assert_eq!(out.len(), 4, "stale contents are cleared first");
}

#[test]
fn billboard_basis_is_orthonormal_and_faces_the_camera() {
    let mut orbit = OrbitCamera::default();
    orbit.orbit(0.7, 0.3);
    for _ in 0..120 {
        orbit.update(1.0 / 60.0);
    }
    let cam = orbit.camera();
    let u = SceneUniforms::from_camera(&cam);
    let right = Vec3::from_slice(&u.cam_right[..3]);
    let up = Vec3::from_slice(&u.cam_up[..3]);
    let forward = (cam.target - cam.eye).normalize();
    assert!((right.length() - 1.0).abs() < 1e-4);
    assert!((up.length() - 1.0).abs() < 1e-4);
    assert!(right.dot(up).abs() < 1e-4);
    assert!(right.dot(forward).abs() < 1e-4);
    assert!(up.dot(forward).abs() < 1e-4);
}

#[test]
fn quad_covers_a_unit_square() {
    let min = QUAD_CORNERS.iter().fold(f32::MAX, |m, c| m.min(c[0]).min(c[1]));
    let max = QUAD_CORNERS.iter().fold(f32::MIN, |m, c| m.max(c[0]).max(c[1]));
    assert_eq!((min, max), (-0.5, 0.5));
}
