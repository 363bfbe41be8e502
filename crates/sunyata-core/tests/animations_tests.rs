// Built-in animations: lifecycle hygiene and the behavior each one shows.

use sunyata_core::animations::*;
use sunyata_core::*;

struct World {
    scene: Scene,
    camera: OrbitCamera,
}

impl World {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: OrbitCamera::default(),
        }
    }

    fn ctx(&mut self) -> SceneContext<'_> {
        SceneContext::new(&mut self.scene, &mut self.camera)
    }

    fn run(&mut self, anim: &mut dyn Animation, seconds: f32, dt: f32) {
        let steps = (seconds / dt).round() as usize;
        for _ in 0..steps {
            anim.update(dt, &mut self.ctx());
        }
    }
}

#[test]
fn every_builtin_initializes_updates_and_disposes_cleanly() {
    let registry = builtin_registry();
    assert_eq!(registry.len(), 8);
    for &tag in registry.tags() {
        let mut world = World::new();
        let (mut anim, resolution) = registry.create(tag, FallbackPolicy::Strict).unwrap();
        assert!(!resolution.is_fallback());
        assert_eq!(anim.tag(), tag);

        anim.init(&mut world.ctx());
        let live = world.scene.live_nodes();
        let allocations = world.scene.allocation_count();
        assert!(live > 0, "{tag} allocated nothing");
        assert!(world.scene.nodes().all(|(_, n)| n.owner == tag));

        for _ in 0..1200 {
            anim.update(1.0 / 60.0, &mut world.ctx());
        }
        // Long frames right at the clamp.
        for _ in 0..50 {
            anim.update(constants::MAX_FRAME_DT, &mut world.ctx());
        }
        assert_eq!(world.scene.allocation_count(), allocations, "{tag} allocated during update");
        assert_eq!(world.scene.live_nodes(), live);
        assert!(anim.phase_label().is_some(), "{tag} has no phase label");
        world.scene.for_each_world_sprite(|s| {
            assert!(s.position.is_finite(), "{tag} produced {s:?}");
            assert!(s.color.is_finite());
        });
        assert!(world.scene.visible_sprite_count() <= constants::MAX_SPRITES);

        anim.dispose(&mut world.ctx());
        assert_eq!(world.scene.live_nodes(), 0, "{tag} leaked nodes");
        assert_eq!(world.scene.sprite_storage(), 0);
        let releases = world.scene.release_count();
        anim.dispose(&mut world.ctx());
        assert_eq!(world.scene.release_count(), releases, "{tag} double-released");

        // Updating a disposed instance is harmless.
        anim.update(0.016, &mut world.ctx());
        assert_eq!(world.scene.live_nodes(), 0);

        anim.init(&mut world.ctx());
        assert_eq!(world.scene.live_nodes(), live, "{tag} cannot be re-initialized");
        anim.dispose(&mut world.ctx());
    }
}

#[test]
fn every_control_accepts_its_own_current_value() {
    let registry = builtin_registry();
    for &tag in registry.tags() {
        let mut world = World::new();
        let (mut anim, _) = registry.create(tag, FallbackPolicy::Strict).unwrap();
        anim.init(&mut world.ctx());
        let controls = anim.controls();
        assert!(!controls.is_empty(), "{tag} exposes no controls");
        for c in controls {
            anim.set_control(c.key, c.value)
                .unwrap_or_else(|e| panic!("{tag}.{}: {e}", c.key));
        }
        assert!(matches!(
            anim.set_control("nope", ControlValue::Trigger),
            Err(ControlError::UnknownControl { animation, .. }) if animation == tag
        ));
        anim.dispose(&mut world.ctx());
    }
}

#[test]
fn instances_are_independent() {
    let mut world = World::new();
    let mut a = Superposition::new();
    let mut b = Superposition::new();
    a.init(&mut world.ctx());
    b.init(&mut world.ctx());
    a.set_control("measure", ControlValue::Trigger).unwrap();
    assert_eq!(a.stage(), SuperpositionStage::Measuring);
    assert_eq!(b.stage(), SuperpositionStage::Superposed);
    a.dispose(&mut world.ctx());
    assert!(world.scene.live_nodes() > 0, "disposing one must not touch the other");
    b.dispose(&mut world.ctx());
    assert_eq!(world.scene.live_nodes(), 0);
}

#[test]
fn superposition_collapses_to_the_certain_outcome() {
    let mut world = World::new();
    let mut anim = Superposition::new();
    anim.init(&mut world.ctx());
    anim.set_control("theta", ControlValue::Number(0.0)).unwrap();
    assert!((anim.p_up() - 1.0).abs() < 1e-6);
    anim.set_control("measure", ControlValue::Trigger).unwrap();
    world.run(&mut anim, 1.5, 0.1);
    assert_eq!(anim.stage(), SuperpositionStage::Collapsed);
    assert_eq!(anim.phase_label(), Some("collapsed: up"));
    assert!(anim.collapse() > 0.99);
}

#[test]
fn superposition_slider_values_are_clamped() {
    let mut anim = Superposition::new();
    anim.set_control("theta", ControlValue::Number(1000.0)).unwrap();
    let theta = anim.controls().into_iter().find(|c| c.key == "theta").unwrap();
    assert_eq!(theta.value, ControlValue::Number(180.0));
    assert!(anim.p_up() < 1e-6);
    assert_eq!(
        anim.set_control("theta", ControlValue::Bool(true)),
        Err(ControlError::WrongKind {
            key: "theta".into(),
            expected: "number"
        })
    );
}

#[test]
fn superposition_reset_replays_like_a_fresh_start() {
    let sprites = |world: &World| {
        let mut v = Vec::new();
        world.scene.for_each_world_sprite(|s| v.push(s));
        v
    };

    let mut fresh_world = World::new();
    let mut fresh = Superposition::new();
    fresh.init(&mut fresh_world.ctx());
    fresh_world.run(&mut fresh, 8.0, 1.0 / 30.0);

    let mut world = World::new();
    let mut anim = Superposition::new();
    anim.init(&mut world.ctx());
    // Several measurements so the outcome and the RNG have moved on.
    for _ in 0..5 {
        anim.set_control("measure", ControlValue::Trigger).unwrap();
        world.run(&mut anim, 4.0, 1.0 / 30.0);
    }
    anim.reset(&mut world.ctx());
    world.run(&mut anim, 8.0, 1.0 / 30.0);

    assert_eq!(anim.stage(), fresh.stage());
    assert_eq!(anim.phase_label(), fresh.phase_label());
    assert_eq!(sprites(&world), sprites(&fresh_world));
}

#[test]
fn superposition_cycles_back_without_input() {
    let mut world = World::new();
    let mut anim = Superposition::new();
    anim.init(&mut world.ctx());
    let mut seen = vec![anim.stage()];
    for _ in 0..(12 * 60) {
        anim.update(1.0 / 60.0, &mut world.ctx());
        if *seen.last().unwrap() != anim.stage() {
            seen.push(anim.stage());
        }
    }
    assert_eq!(
        &seen[..5],
        &[
            SuperpositionStage::Superposed,
            SuperpositionStage::Measuring,
            SuperpositionStage::Collapsed,
            SuperpositionStage::Restoring,
            SuperpositionStage::Superposed,
        ]
    );
}

#[test]
fn entangled_outcomes_follow_the_chosen_correlation() {
    for (choice, same) in [(0usize, false), (1usize, true)] {
        let mut world = World::new();
        let mut anim = Entanglement::new();
        anim.init(&mut world.ctx());
        anim.set_control("correlation", ControlValue::Choice(choice)).unwrap();
        for _ in 0..5 {
            anim.reset(&mut world.ctx());
            anim.set_control("measure", ControlValue::Trigger).unwrap();
            assert_eq!(anim.stage(), PairStage::Measured);
            let (left, right) = anim.outcome().unwrap();
            assert_eq!(left == right, same);
            // Let it play a full cycle between measurements.
            world.run(&mut anim, 11.0, 0.05);
        }
    }
}

#[test]
fn entanglement_rejects_missing_option() {
    let mut anim = Entanglement::new();
    assert_eq!(
        anim.set_control("correlation", ControlValue::Choice(7)),
        Err(ControlError::NoSuchOption {
            key: "correlation".into(),
            index: 7
        })
    );
}

#[test]
fn shield_keeps_decoherence_above_floor() {
    let mut world = World::new();
    let mut anim = Decoherence::new();
    anim.init(&mut world.ctx());
    anim.set_control("coupling", ControlValue::Number(1.0)).unwrap();
    anim.set_control("shield", ControlValue::Bool(true)).unwrap();
    let mut lowest: f32 = 1.0;
    for _ in 0..(15 * 60) {
        anim.update(1.0 / 60.0, &mut world.ctx());
        lowest = lowest.min(anim.coherence());
    }
    assert!(lowest >= 0.8 - 1e-6, "coherence fell to {lowest}");
}

#[test]
fn unshielded_decoherence_breaks_and_recovers() {
    let mut world = World::new();
    let mut anim = Decoherence::new();
    anim.init(&mut world.ctx());
    anim.set_control("coupling", ControlValue::Number(1.0)).unwrap();
    let mut lowest: f32 = 1.0;
    let mut saw_environment = false;
    for _ in 0..(12 * 60) {
        anim.update(1.0 / 60.0, &mut world.ctx());
        lowest = lowest.min(anim.coherence());
        saw_environment |= anim.environment_alive() > 0;
    }
    assert!(lowest < 0.2, "coherence only fell to {lowest}");
    assert!(saw_environment);
}

#[test]
fn transmission_falls_with_height_and_width() {
    assert!((transmission_probability(1.0, 0.0) - 1.0).abs() < 1e-6);
    assert!(transmission_probability(2.0, 0.5) < transmission_probability(1.0, 0.5));
    assert!(transmission_probability(1.0, 0.8) < transmission_probability(1.0, 0.4));
    let p = transmission_probability(3.0, 1.0);
    assert!((0.0..1e-2).contains(&p));
}

#[test]
fn thin_low_barrier_mostly_transmits() {
    let mut world = World::new();
    let mut anim = Tunneling::new();
    anim.init(&mut world.ctx());
    anim.set_control("height", ControlValue::Number(0.2)).unwrap();
    anim.set_control("width", ControlValue::Number(0.1)).unwrap();
    world.run(&mut anim, 7.0 * 20.0, 0.05);
    let (ok, attempts) = anim.tally();
    assert!(attempts >= 15, "only {attempts} attempts");
    assert!(ok * 2 > attempts, "{ok}/{attempts} transmitted");
}

#[test]
fn thick_high_barrier_mostly_reflects() {
    let mut world = World::new();
    let mut anim = Tunneling::new();
    anim.init(&mut world.ctx());
    anim.set_control("height", ControlValue::Number(3.0)).unwrap();
    anim.set_control("width", ControlValue::Number(1.0)).unwrap();
    world.run(&mut anim, 7.0 * 10.0, 0.05);
    let (ok, attempts) = anim.tally();
    assert!(attempts >= 5);
    assert!(ok * 4 < attempts, "{ok}/{attempts} transmitted");
}

fn central_fraction(observe: bool) -> f32 {
    let mut world = World::new();
    let mut anim = DoubleSlit::new();
    anim.init(&mut world.ctx());
    anim.set_control("observe", ControlValue::Bool(observe)).unwrap();
    anim.set_control("rate", ControlValue::Number(80.0)).unwrap();
    world.run(&mut anim, 10.0, 1.0 / 60.0);
    let total = anim.hit_count();
    assert!(total > 200, "only {total} hits");
    let central = anim.hits().filter(|h| h.y.abs() < 0.25).count();
    central as f32 / total as f32
}

#[test]
fn watching_the_slits_removes_the_central_fringe() {
    let wave = central_fraction(false);
    let observed = central_fraction(true);
    assert!(wave > 0.1, "wave central fraction {wave}");
    assert!(observed < 0.05, "observed central fraction {observed}");
}

#[test]
fn fringe_intensity_peaks_at_center() {
    assert!((fringe_intensity(0.0, 1.0) - 1.0).abs() < 1e-6);
    // First dark fringe for separation 1 sits half a fringe spacing out.
    assert!(fringe_intensity(0.5, 1.0) < 1e-3);
}

#[test]
fn double_slit_in_flight_stays_within_pool() {
    let mut world = World::new();
    let mut anim = DoubleSlit::new();
    anim.init(&mut world.ctx());
    anim.set_control("rate", ControlValue::Number(80.0)).unwrap();
    for _ in 0..600 {
        anim.update(1.0 / 60.0, &mut world.ctx());
        assert!(anim.in_flight() <= 400);
    }
}

#[test]
fn vacuum_pairs_annihilate() {
    let mut world = World::new();
    let mut anim = VacuumFluctuation::new();
    anim.init(&mut world.ctx());
    anim.set_control("energy", ControlValue::Number(3.0)).unwrap();
    for _ in 0..(8 * 60) {
        anim.update(1.0 / 60.0, &mut world.ctx());
        assert!(anim.live_pairs() <= 150);
    }
    assert!(anim.annihilations() > 20);
    anim.reset(&mut world.ctx());
    assert_eq!(anim.annihilations(), 0);
    assert_eq!(anim.live_pairs(), 0);
}

#[test]
fn uncertainty_product_stays_at_the_bound() {
    let mut world = World::new();
    let mut anim = Uncertainty::new();
    anim.init(&mut world.ctx());
    for _ in 0..(10 * 60) {
        anim.update(1.0 / 60.0, &mut world.ctx());
        let (sx, sp) = anim.spreads();
        assert!((sx * sp - HBAR / 2.0).abs() < 1e-4);
    }
    assert!((momentum_spread(0.5) - 1.0).abs() < 1e-6);
}

#[test]
fn manual_width_stops_the_squeeze() {
    let mut world = World::new();
    let mut anim = Uncertainty::new();
    anim.init(&mut world.ctx());
    anim.set_control("width", ControlValue::Number(1.5)).unwrap();
    world.run(&mut anim, 5.0, 0.05);
    assert_eq!(anim.spreads().0, 1.5);
    assert_eq!(anim.phase_label(), Some("manual"));
}

#[test]
fn clicking_a_source_silences_it() {
    let mut world = World::new();
    let mut anim = Interference::new();
    anim.init(&mut world.ctx());
    assert_eq!(anim.sources_enabled(), [true, true]);
    // Default separation 2 puts the right source at x = 1.
    let hit = world
        .scene
        .pick(glam::Vec3::new(1.0, 0.3, 10.0), glam::Vec3::NEG_Z, 1.0)
        .expect("source hit");
    assert_eq!(hit.label, "sources");
    assert!(anim.on_pick(&hit, &mut world.ctx()));
    assert_eq!(anim.sources_enabled(), [true, false]);
    assert_eq!(anim.phase_label(), Some("one source"));
    assert!(anim.height_at(0.0, 0.0).abs() <= 0.35);
}
