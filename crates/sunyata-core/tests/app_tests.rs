// Application context: navigation, timing, resize and frame driving.

use sunyata_core::constants::{MAX_FRAME_DT, MAX_SPEED, MIN_SPEED};
use sunyata_core::*;

fn app() -> App {
    let chapter = Library::builtin().first_chapter().unwrap().number;
    App::with_builtin(chapter, AppConfig::default()).unwrap()
}

/// Records what it was asked to draw.
#[derive(Default)]
struct CountingSink {
    frames: usize,
    last_sprites: usize,
}

impl FrameSink for CountingSink {
    type Error = std::convert::Infallible;

    fn draw(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), Self::Error> {
        self.frames += 1;
        self.last_sprites = scene.visible_sprite_count();
        Ok(())
    }
}

struct FailingSink;

impl FrameSink for FailingSink {
    type Error = &'static str;

    fn draw(&mut self, _scene: &Scene, _camera: &Camera) -> Result<(), Self::Error> {
        Err("device lost")
    }
}

#[test]
fn starts_on_first_verse_with_its_animation() {
    let app = app();
    let first = app.content().first();
    assert_eq!(app.current_entry().id, first.id);
    assert_eq!(app.active_tag(), Some(first.animation_tag));
    assert_eq!(app.position(), (0, app.content().len()));
}

#[test]
fn next_and_prev_walk_the_chapter_and_clamp() {
    let mut app = app();
    let len = app.content().len();
    let mut steps = 0;
    while app.next().unwrap() {
        steps += 1;
        assert_eq!(app.active_tag(), Some(app.current_entry().animation_tag));
        assert!(app.scene().live_nodes() > 0);
    }
    assert_eq!(steps, len - 1);
    assert_eq!(app.current_entry().id, app.content().last().id);
    assert!(!app.next().unwrap(), "no wrap past the last verse");
    while app.prev().unwrap() {}
    assert_eq!(app.current_entry().id, app.content().first().id);
    assert!(!app.prev().unwrap());
}

#[test]
fn navigation_keeps_exactly_one_animation_in_the_scene() {
    let mut app = app();
    for _ in 0..3 {
        while app.next().unwrap() {
            app.advance(0.05);
            let tag = app.active_tag().unwrap();
            let foreign = app
                .scene()
                .nodes()
                .filter(|(_, n)| n.owner != tag)
                .count();
            assert_eq!(foreign, 0, "nodes left behind when switching to {tag}");
        }
        while app.prev().unwrap() {}
    }
}

#[test]
fn go_to_unknown_verse_keeps_current() {
    let mut app = app();
    app.next().unwrap();
    let before = app.current_entry().id;
    let err = app.go_to(60_000).unwrap_err();
    assert_eq!(err, SunyataError::Content(ContentError::UnknownVerse(60_000)));
    assert_eq!(app.current_entry().id, before);
}

#[test]
fn unknown_chapter_is_an_error() {
    assert!(matches!(
        App::with_builtin(4242, AppConfig::default()),
        Err(SunyataError::Content(ContentError::UnknownChapter(4242)))
    ));
}

#[test]
fn paused_app_holds_simulation_time() {
    let mut app = app();
    app.advance(0.05);
    let t = app.sim_time();
    assert!(app.toggle_pause());
    for _ in 0..10 {
        app.advance(0.05);
    }
    assert_eq!(app.sim_time(), t);
    app.set_paused(false);
    app.advance(0.05);
    assert!(app.sim_time() > t);
}

#[test]
fn long_gaps_are_clamped() {
    let mut app = app();
    app.advance(30.0);
    assert!(app.sim_time() <= MAX_FRAME_DT as f64 + 1e-6);
}

#[test]
fn speed_scales_simulation_time_and_is_clamped() {
    let mut app = app();
    app.set_speed(2.0);
    app.advance(0.05);
    assert!((app.sim_time() - 0.1).abs() < 1e-5);
    app.set_speed(100.0);
    assert_eq!(app.speed(), MAX_SPEED);
    app.set_speed(0.0);
    assert_eq!(app.speed(), MIN_SPEED);
    app.set_speed(f32::NAN);
    assert_eq!(app.speed(), MIN_SPEED);
}

#[test]
fn resize_does_not_perturb_the_simulation() {
    let mut a = app();
    let mut b = app();
    for i in 0..200 {
        if i % 17 == 0 {
            b.resize(300 + i, 200 + 2 * i);
        }
        a.advance(1.0 / 60.0);
        b.advance(1.0 / 60.0);
    }
    assert_eq!(a.phase_label(), b.phase_label());
    let sprites = |app: &App| {
        let mut v = Vec::new();
        app.scene().for_each_world_sprite(|s| v.push(s));
        v
    };
    assert_eq!(sprites(&a), sprites(&b));
    assert_eq!(b.viewport(), (300 + 187, 200 + 2 * 187));
}

#[test]
fn resize_guards_zero_sizes() {
    let mut app = app();
    app.resize(0, 0);
    assert_eq!(app.viewport(), (1, 1));
    assert!(app.camera().aspect().is_finite());
}

#[test]
fn tick_draws_once_per_frame() {
    let mut app = app();
    let mut sink = CountingSink::default();
    for _ in 0..5 {
        app.tick(1.0 / 60.0, &mut sink).unwrap();
    }
    assert_eq!(sink.frames, 5);
    assert!(sink.last_sprites > 0);
}

#[test]
fn sink_errors_are_returned() {
    let mut app = app();
    assert_eq!(app.tick(0.016, &mut FailingSink), Err("device lost"));
}

#[test]
fn frame_uses_the_internal_clock() {
    let mut app = app();
    let mut sink = CountingSink::default();
    app.frame(&mut sink).unwrap();
    app.frame(&mut sink).unwrap();
    assert_eq!(sink.frames, 2);
    assert_eq!(app.frames(), 2);
}

#[test]
fn fps_log_fires_on_the_interval() {
    use sunyata_core::constants::FPS_LOG_INTERVAL_FRAMES;
    let mut app = app();
    let mut sink = CountingSink::default();
    assert!(!app.fps_log_due(), "nothing to report before the first frame");
    let mut due = Vec::new();
    for _ in 0..FPS_LOG_INTERVAL_FRAMES * 2 {
        app.frame(&mut sink).unwrap();
        if app.fps_log_due() {
            due.push(app.frames());
        }
    }
    assert_eq!(due, vec![FPS_LOG_INTERVAL_FRAMES, FPS_LOG_INTERVAL_FRAMES * 2]);
}

#[test]
fn reset_restarts_the_active_animation() {
    let mut app = app();
    for _ in 0..600 {
        app.advance(1.0 / 60.0);
    }
    let live = app.scene().live_nodes();
    app.reset();
    assert_eq!(app.sim_time(), 0.0);
    assert_eq!(app.scene().live_nodes(), live, "reset keeps nodes allocated");
    assert_eq!(app.active_tag(), Some(app.current_entry().animation_tag));
}

#[test]
fn reset_keeps_the_configured_camera() {
    let chapter = Library::builtin().first_chapter().unwrap().number;
    let config = AppConfig {
        camera_distance: 20.0,
        auto_rotate: 0.3,
        ..AppConfig::default()
    };
    let mut app = App::with_builtin(chapter, config).unwrap();
    app.zoom(-2000.0);
    app.orbit(300.0, 50.0);
    for _ in 0..120 {
        app.advance(1.0 / 60.0);
    }
    app.reset();
    assert_eq!(app.camera().auto_rotate, 0.3);
    let yaw = app.camera().yaw();
    for _ in 0..600 {
        app.advance(1.0 / 60.0);
    }
    assert!((app.camera().distance() - 20.0).abs() < 1e-2);
    assert!(app.camera().yaw() > yaw, "auto-rotation stopped after reset");
}

#[test]
fn controls_follow_the_active_animation() {
    let mut app = app();
    let first = app.controls();
    assert!(!first.is_empty());
    app.next().unwrap();
    let second = app.controls();
    assert_ne!(
        first.iter().map(|c| c.key).collect::<Vec<_>>(),
        second.iter().map(|c| c.key).collect::<Vec<_>>()
    );
    assert!(matches!(
        app.set_control("definitely_not_a_control", ControlValue::Trigger),
        Err(ControlError::UnknownControl { .. })
    ));
}

#[test]
fn camera_keeps_easing_while_paused() {
    let mut app = app();
    app.set_paused(true);
    let before = app.sim_time();
    let d = app.camera().distance();
    app.zoom(500.0);
    app.orbit(120.0, -40.0);
    for _ in 0..120 {
        app.advance(1.0 / 60.0);
    }
    assert!(app.camera().distance() > d);
    assert_eq!(app.sim_time(), before);
}

#[test]
fn picking_empty_space_hits_nothing() {
    let mut app = app();
    app.resize(800, 600);
    // Top-left corner looks past everything the first animation draws.
    assert!(app.pick_screen(0.0, 0.0).is_none());
}

#[test]
fn unregistered_tag_falls_back_under_default_policy() {
    static ODD: Chapter = Chapter {
        number: 7,
        title: "Odd",
        subtitle: "",
        entries: &[ContentEntry {
            id: 1,
            display_text: "x",
            concept_text: "",
            parallel_text: "",
            explanation_text: "",
            animation_tag: "mystery",
        }],
    };
    let content = ContentRegistry::new(&ODD).unwrap();
    let app = App::new(content, builtin_registry(), AppConfig::default()).unwrap();
    assert_eq!(app.active_tag(), Some(DEFAULT_ANIMATION));

    let content = ContentRegistry::new(&ODD).unwrap();
    let strict = AppConfig {
        fallback: FallbackPolicy::Strict,
        ..AppConfig::default()
    };
    assert!(matches!(
        App::new(content, builtin_registry(), strict),
        Err(SunyataError::Dispatch(DispatchError::UnknownTag(_)))
    ));
}
