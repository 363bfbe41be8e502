// Building blocks shared by the animations: pools, scene slab, tweens,
// controls, camera and frame clock.

use glam::{Vec3, Vec4};
use std::time::Duration;
use sunyata_core::*;

#[test]
fn pool_spawn_fails_when_full_and_reuses_dead_slots() {
    let mut pool = ParticlePool::new(3);
    for i in 0..3 {
        assert_eq!(pool.spawn(Vec3::ZERO, Vec3::X, 1.0, i as f32), Some(i));
    }
    assert!(pool.is_full());
    assert_eq!(pool.spawn(Vec3::ZERO, Vec3::X, 1.0, 9.0), None);
    pool.kill(1);
    assert_eq!(pool.alive(), 2);
    assert_eq!(pool.spawn(Vec3::ZERO, Vec3::X, 1.0, 9.0), Some(1));
    assert_eq!(pool.capacity(), 3);
}

#[test]
fn pool_step_integrates_and_retires() {
    let mut pool = ParticlePool::new(4);
    pool.spawn(Vec3::ZERO, Vec3::X, 0.5, 0.0);
    pool.spawn(Vec3::ZERO, Vec3::ZERO, f32::INFINITY, 0.0);
    let died = pool.step(0.25, |_| Vec3::new(0.0, -4.0, 0.0));
    assert_eq!(died, 0);
    let p = pool.get(0).unwrap();
    assert!((p.position.x - 0.25).abs() < 1e-6);
    assert!((p.velocity.y + 1.0).abs() < 1e-6);
    assert!((p.life_fraction() - 0.5).abs() < 1e-6);
    assert_eq!(pool.step(0.3, |_| Vec3::ZERO), 1);
    assert!(pool.get(0).is_none());
    assert_eq!(pool.alive(), 1);
    assert_eq!(pool.get(1).unwrap().life_fraction(), 0.0);
    pool.kill(0);
    assert_eq!(pool.alive(), 1, "killing a dead slot is a no-op");
    pool.clear();
    assert_eq!(pool.iter_alive().count(), 0);
}

#[test]
fn stale_node_ids_do_not_alias_new_nodes() {
    let mut scene = Scene::new();
    let a = scene.add_node("t", "a", 4);
    assert!(scene.remove(a));
    let b = scene.add_node("t", "b", 2);
    assert_ne!(a, b);
    assert!(!scene.contains(a));
    assert!(!scene.remove(a));
    assert!(scene.node(a).is_none());
    assert_eq!(scene.node(b).unwrap().label, "b");
    assert_eq!(scene.live_nodes(), 1);
    assert_eq!(scene.sprite_storage(), 2);
    assert_eq!(scene.allocation_count(), 2);
    assert_eq!(scene.release_count(), 1);
}

#[test]
fn world_sprites_fold_transform_and_opacity() {
    let mut scene = Scene::new();
    let id = scene.add_node("t", "n", 3);
    {
        let node = scene.node_mut(id).unwrap();
        node.transform.translation = Vec3::new(1.0, 0.0, 0.0);
        node.transform.scale = 2.0;
        node.opacity = 0.5;
        let s = node.sprites_mut();
        s[0] = Sprite::new(Vec3::Y, 0.1, Vec4::ONE);
        s[1] = Sprite::new(Vec3::Z, 0.1, Vec4::new(1.0, 1.0, 1.0, 0.0));
        s[2] = Sprite::new(Vec3::X, 0.1, Vec4::ONE);
        node.set_active(2);
    }
    let mut out = Vec::new();
    scene.for_each_world_sprite(|s| out.push(s));
    // Fully transparent and inactive sprites are skipped.
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position, Vec3::new(1.0, 2.0, 0.0));
    assert!((out[0].size - 0.2).abs() < 1e-6);
    assert!((out[0].color.w - 0.5).abs() < 1e-6);

    scene.node_mut(id).unwrap().visible = false;
    assert_eq!(scene.visible_sprite_count(), 0);
}

#[test]
fn pick_returns_nearest_pickable_sprite() {
    let mut scene = Scene::new();
    let far = scene.add_node("t", "far", 1);
    let near = scene.add_node("t", "near", 1);
    let hidden = scene.add_node("t", "not pickable", 1);
    for (id, z) in [(far, -5.0), (near, 0.0), (hidden, 2.0)] {
        let node = scene.node_mut(id).unwrap();
        node.pickable = id != hidden;
        node.sprites_mut()[0] = Sprite::new(Vec3::new(0.0, 0.0, z), 1.0, Vec4::ONE);
    }
    let hit = scene.pick(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, 1.0).unwrap();
    assert_eq!(hit.node, near);
    assert!((hit.distance - 9.5).abs() < 1e-4);
    assert!(scene.pick(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z, 1.0).is_none());
}

#[test]
fn tween_replaces_same_key_and_cancels() {
    let mut set = TweenSet::new();
    set.start("a", 0.0, 10.0, 1.0, Easing::Linear);
    set.start("a", 5.0, 6.0, 1.0, Easing::Linear);
    set.start("b", 0.0, 1.0, 1.0, Easing::Linear);
    assert_eq!(set.len(), 2);
    let mut a = 0.0;
    set.tick(0.5, |k, v| {
        if k == "a" {
            a = v;
        }
    });
    assert!((a - 5.5).abs() < 1e-6);
    assert!(set.cancel("b"));
    assert!(!set.is_active("b"));
    assert_eq!(set.cancel_all(), 1);
    assert!(set.is_empty());
}

#[test]
fn cancelled_tweens_never_write_again() {
    let mut set = TweenSet::new();
    set.start(0u8, 0.0, 1.0, 2.0, Easing::CubicInOut);
    set.cancel_all();
    let mut writes = 0;
    for _ in 0..10 {
        set.tick(0.5, |_, _| writes += 1);
    }
    assert_eq!(writes, 0);
}

#[test]
fn control_coercion() {
    let slider = ControlDescriptor::slider("s", "S", -1.0, 1.0, 0.1, 0.25);
    assert_eq!(slider.coerce(ControlValue::Number(5.0)), Ok(ControlValue::Number(1.0)));
    assert_eq!(slider.coerce(ControlValue::Number(f32::NAN)), Ok(ControlValue::Number(0.25)));
    assert!(slider.coerce(ControlValue::Trigger).is_err());

    let toggle = ControlDescriptor::toggle("t", "T", false);
    assert_eq!(toggle.coerce(ControlValue::Bool(true)), Ok(ControlValue::Bool(true)));
    assert!(toggle.coerce(ControlValue::Number(1.0)).is_err());

    let choice = ControlDescriptor::choice("c", "C", &["x", "y"], 0);
    assert_eq!(choice.coerce(ControlValue::Choice(1)), Ok(ControlValue::Choice(1)));
    assert!(choice.coerce(ControlValue::Choice(2)).is_err());

    let button = ControlDescriptor::button("b", "B");
    assert_eq!(button.coerce(ControlValue::Trigger), Ok(ControlValue::Trigger));
    assert_eq!(ControlValue::Number(2.0).as_f32(), Some(2.0));
    assert_eq!(ControlValue::Bool(true).as_f32(), None);
    assert_eq!(ControlValue::Choice(3).as_choice(), Some(3));
    assert_eq!(ControlValue::Bool(false).as_bool(), Some(false));
}

#[test]
fn orbit_camera_eases_and_clamps() {
    use sunyata_core::constants::{CAMERA_MAX_DISTANCE, CAMERA_MAX_PITCH, CAMERA_MIN_DISTANCE};
    let mut cam = OrbitCamera::default();
    cam.orbit(0.0, 100.0);
    cam.zoom(1000.0);
    for _ in 0..600 {
        cam.update(1.0 / 60.0);
    }
    assert!(cam.pitch() <= CAMERA_MAX_PITCH + 1e-4);
    assert!((cam.distance() - CAMERA_MAX_DISTANCE).abs() < 1e-2);
    cam.zoom(0.0001);
    cam.zoom(f32::NAN);
    for _ in 0..600 {
        cam.update(1.0 / 60.0);
    }
    assert!((cam.distance() - CAMERA_MIN_DISTANCE).abs() < 1e-2);
    cam.set_aspect(1600, 800);
    cam.reset();
    assert_eq!(cam.aspect(), 2.0, "reset keeps the viewport aspect");
}

#[test]
fn center_of_screen_ray_points_at_target() {
    let cam = OrbitCamera::default();
    let (origin, dir) = cam.screen_ray(400.0, 300.0, 800.0, 600.0);
    let to_target = (cam.target - origin).normalize();
    assert!(dir.dot(to_target) > 0.999);
}

#[test]
fn frame_clock_clamps_gaps() {
    let mut clock = FrameClock::new(0.1);
    let t0 = instant::Instant::now();
    assert_eq!(clock.tick_at(t0), 0.0);
    let dt = clock.tick_at(t0 + Duration::from_millis(16));
    assert!((dt - 0.016).abs() < 1e-4);
    assert_eq!(clock.tick_at(t0 + Duration::from_secs(60)), 0.1);
    assert_eq!(clock.frames(), 3);
    assert_eq!(clock.clamp_dt(f32::INFINITY), 0.0);
    assert_eq!(clock.clamp_dt(-1.0), 0.0);
}
