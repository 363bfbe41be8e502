// Dispatcher and lifecycle ordering, driven by recording mock animations.

use std::cell::RefCell;
use sunyata_core::*;

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(event: String) {
    EVENTS.with(|e| e.borrow_mut().push(event));
}

fn take_events() -> Vec<String> {
    EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
}

struct Recorder {
    tag: &'static str,
    nodes: NodeSet,
    updates: u32,
}

impl Recorder {
    fn boxed(tag: &'static str) -> Box<dyn Animation> {
        Box::new(Self {
            tag,
            nodes: NodeSet::new(),
            updates: 0,
        })
    }
}

impl Animation for Recorder {
    fn tag(&self) -> &'static str {
        self.tag
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        record(format!("init {}", self.tag));
        self.nodes.add(ctx.scene, self.tag, "body", 4);
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext<'_>) {
        self.updates += 1;
        record(format!("update {}", self.tag));
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![ControlDescriptor::slider("gain", "Gain", 0.0, 1.0, 0.1, 0.5)]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        controls::resolve(self.tag, &self.controls(), key, value).map(|_| ())
    }

    fn reset(&mut self, _ctx: &mut SceneContext<'_>) {
        record(format!("reset {}", self.tag));
    }

    fn dispose(&mut self, ctx: &mut SceneContext<'_>) {
        let released = self.nodes.release_all(ctx.scene);
        record(format!("dispose {} released={}", self.tag, released));
    }
}

fn registry() -> AnimationRegistry {
    AnimationRegistry::new("alpha")
        .with("alpha", || Recorder::boxed("alpha"))
        .with("beta", || Recorder::boxed("beta"))
        .with("gamma", || Recorder::boxed("gamma"))
}

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
}

#[test]
fn previous_instance_is_disposed_before_next_init() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    d.activate("alpha", &mut world.ctx()).unwrap();
    d.activate("beta", &mut world.ctx()).unwrap();
    d.activate("gamma", &mut world.ctx()).unwrap();
    assert_eq!(
        take_events(),
        vec![
            "init alpha",
            "dispose alpha released=1",
            "init beta",
            "dispose beta released=1",
            "init gamma",
        ]
    );
    assert_eq!(d.active_tag(), Some("gamma"));
    assert_eq!(world.scene.live_nodes(), 1, "only the active instance owns nodes");
}

#[test]
fn rapid_navigation_never_leaves_two_instances_alive() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    let tags = ["alpha", "beta", "alpha", "gamma", "beta", "beta", "alpha"];
    for tag in tags {
        d.activate(tag, &mut world.ctx()).unwrap();
        assert_eq!(world.scene.live_nodes(), 1);
    }
    let events = take_events();
    let inits = events.iter().filter(|e| e.starts_with("init")).count();
    let disposes = events.iter().filter(|e| e.starts_with("dispose")).count();
    assert_eq!(inits, tags.len());
    assert_eq!(disposes, tags.len() - 1);
    assert!(events.iter().all(|e| !e.ends_with("released=0")), "{events:?}");
}

#[test]
fn reactivating_the_same_tag_builds_a_fresh_instance() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    d.activate("beta", &mut world.ctx()).unwrap();
    d.activate("beta", &mut world.ctx()).unwrap();
    assert_eq!(
        take_events(),
        vec!["init beta", "dispose beta released=1", "init beta"]
    );
    assert_eq!(d.activations(), 2);
}

#[test]
fn only_the_active_instance_is_updated() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    d.activate("alpha", &mut world.ctx()).unwrap();
    d.update(0.016, &mut world.ctx());
    d.activate("beta", &mut world.ctx()).unwrap();
    d.update(0.016, &mut world.ctx());
    d.update(0.016, &mut world.ctx());
    let updates: Vec<_> = take_events()
        .into_iter()
        .filter(|e| e.starts_with("update"))
        .collect();
    assert_eq!(updates, vec!["update alpha", "update beta", "update beta"]);
}

#[test]
fn unknown_tag_falls_back_to_default_deterministically() {
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    for _ in 0..3 {
        let r = d.activate("no_such_thing", &mut world.ctx()).unwrap();
        assert!(r.is_fallback());
        assert_eq!(r.tag, "alpha");
        assert_eq!(r.substituted_for.as_deref(), Some("no_such_thing"));
        assert_eq!(d.active_tag(), Some("alpha"));
    }
}

#[test]
fn strict_policy_rejects_unknown_tag_and_keeps_current() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::Strict);
    d.activate("beta", &mut world.ctx()).unwrap();
    let err = d.activate("missing", &mut world.ctx()).unwrap_err();
    assert_eq!(err, DispatchError::UnknownTag("missing".into()));
    assert_eq!(d.active_tag(), Some("beta"));
    assert_eq!(take_events(), vec!["init beta"], "nothing torn down on rejection");
}

#[test]
fn missing_default_is_reported() {
    let reg = AnimationRegistry::new("nowhere").with("alpha", || Recorder::boxed("alpha"));
    let err = reg.resolve("beta", FallbackPolicy::UseDefault).unwrap_err();
    assert_eq!(err, DispatchError::MissingDefault("nowhere"));
}

#[test]
fn deactivate_is_idempotent() {
    take_events();
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    d.activate("alpha", &mut world.ctx()).unwrap();
    assert_eq!(d.deactivate(&mut world.ctx()), Some("alpha"));
    assert_eq!(d.deactivate(&mut world.ctx()), None);
    assert!(!d.is_active());
    assert_eq!(world.scene.live_nodes(), 0);
    assert_eq!(world.scene.release_count(), 1);
    assert_eq!(
        take_events(),
        vec!["init alpha", "dispose alpha released=1"]
    );
}

#[test]
fn control_changes_without_active_animation_fail() {
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    assert_eq!(
        d.set_control("gain", ControlValue::Number(0.2)),
        Err(ControlError::NoActiveAnimation)
    );
    assert!(d.controls().is_empty());
}

#[test]
fn control_changes_reach_the_active_animation() {
    let mut world = World::new();
    let mut d = Dispatcher::new(registry(), FallbackPolicy::UseDefault);
    d.activate("alpha", &mut world.ctx()).unwrap();
    assert!(d.set_control("gain", ControlValue::Number(0.2)).is_ok());
    assert!(matches!(
        d.set_control("volume", ControlValue::Number(0.2)),
        Err(ControlError::UnknownControl { animation: "alpha", .. })
    ));
}

#[test]
fn registry_keeps_registration_order() {
    let reg = registry();
    assert_eq!(reg.tags(), &["alpha", "beta", "gamma"]);
    assert_eq!(reg.default_tag(), "alpha");
    assert!(reg.contains("gamma"));
    assert!(!reg.contains("delta"));
}
