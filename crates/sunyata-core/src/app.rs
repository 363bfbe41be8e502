//! Application context: the one place that owns the page state.
//!
//! Front-ends keep an `App` (behind `Rc<RefCell<_>>` on the web) and
//! call into it from input handlers and from the frame callback.

use crate::camera::OrbitCamera;
use crate::constants::{
    CAMERA_DEFAULT_DISTANCE, DEFAULT_SPEED, FPS_LOG_INTERVAL_FRAMES, MAX_FRAME_DT, MAX_SPEED,
    MIN_SPEED, ORBIT_RADIANS_PER_PIXEL, PICK_SCALE, ZOOM_PER_WHEEL_UNIT,
};
use crate::content::{Chapter, ContentEntry, ContentRegistry, Library};
use crate::controls::{ControlDescriptor, ControlValue};
use crate::dispatcher::Dispatcher;
use crate::driver::{FrameClock, FrameSink};
use crate::error::{ControlError, SunyataError};
use crate::registry::{AnimationRegistry, FallbackPolicy};
use crate::scene::{PickHit, Scene, SceneContext};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub fallback: FallbackPolicy,
    /// Initial time scale applied to every simulation step.
    pub speed: f32,
    pub max_frame_dt: f32,
    pub camera_distance: f32,
    pub auto_rotate: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::UseDefault,
            speed: DEFAULT_SPEED,
            max_frame_dt: MAX_FRAME_DT,
            camera_distance: CAMERA_DEFAULT_DISTANCE,
            auto_rotate: 0.05,
        }
    }
}

pub struct App {
    content: ContentRegistry,
    dispatcher: Dispatcher,
    scene: Scene,
    camera: OrbitCamera,
    clock: FrameClock,
    current: &'static ContentEntry,
    paused: bool,
    speed: f32,
    viewport: (u32, u32),
    sim_time: f64,
}

impl App {
    /// Build the app and activate the chapter's first verse.
    pub fn new(
        content: ContentRegistry,
        registry: AnimationRegistry,
        config: AppConfig,
    ) -> Result<Self, SunyataError> {
        for (id, tag) in content.unregistered_tags(|t| registry.contains(t)) {
            log::warn!(
                "[content] chapter {} verse {} names unregistered animation `{}`",
                content.chapter().number,
                id,
                tag
            );
        }
        let mut camera = OrbitCamera::new(config.camera_distance);
        camera.auto_rotate = config.auto_rotate;
        let current = content.first();
        let mut app = Self {
            content,
            dispatcher: Dispatcher::new(registry, config.fallback),
            scene: Scene::new(),
            camera,
            clock: FrameClock::new(config.max_frame_dt),
            current,
            paused: false,
            speed: config.speed.clamp(MIN_SPEED, MAX_SPEED),
            viewport: (1, 1),
            sim_time: 0.0,
        };
        app.activate_current()?;
        Ok(app)
    }

    /// The built-in content and animations for `chapter`.
    pub fn with_builtin(chapter: u32, config: AppConfig) -> Result<Self, SunyataError> {
        let content = Library::builtin().registry(chapter)?;
        Self::new(content, crate::animations::builtin_registry(), config)
    }

    fn activate_current(&mut self) -> Result<(), SunyataError> {
        let mut ctx = SceneContext::new(&mut self.scene, &mut self.camera);
        self.dispatcher.activate(self.current.animation_tag, &mut ctx)?;
        Ok(())
    }

    pub fn chapter(&self) -> &'static Chapter {
        self.content.chapter()
    }

    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    pub fn current_entry(&self) -> &'static ContentEntry {
        self.current
    }

    /// Zero-based index of the current verse and the chapter length.
    pub fn position(&self) -> (usize, usize) {
        (
            self.content.position(self.current.id).unwrap_or(0),
            self.content.len(),
        )
    }

    /// Show verse `id`, swapping the animation. On error the previous verse
    /// stays current.
    pub fn go_to(&mut self, id: u32) -> Result<&'static ContentEntry, SunyataError> {
        let entry = self.content.lookup(id)?;
        log::info!("[nav] chapter {} verse {}", self.content.chapter().number, id);
        let mut ctx = SceneContext::new(&mut self.scene, &mut self.camera);
        self.dispatcher.activate(entry.animation_tag, &mut ctx)?;
        self.current = entry;
        self.sim_time = 0.0;
        Ok(entry)
    }

    /// Move to the next verse. Returns `false` at the end of the chapter.
    pub fn next(&mut self) -> Result<bool, SunyataError> {
        match self.content.next_after(self.current.id) {
            Some(e) => self.go_to(e.id).map(|_| true),
            None => Ok(false),
        }
    }

    /// Move to the previous verse. Returns `false` at the start.
    pub fn prev(&mut self) -> Result<bool, SunyataError> {
        match self.content.prev_before(self.current.id) {
            Some(e) => self.go_to(e.id).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("[app] paused={}", self.paused);
        self.paused
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
    }

    /// Restart the active animation and reframe the camera.
    pub fn reset(&mut self) {
        self.camera.reset();
        self.sim_time = 0.0;
        let mut ctx = SceneContext::new(&mut self.scene, &mut self.camera);
        self.dispatcher.reset(&mut ctx);
    }

    /// Viewport changed. Only the camera aspect follows; simulation state
    /// is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        self.camera.set_aspect(self.viewport.0, self.viewport.1);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Advance simulation (unless paused) and camera by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let dt = self.clock.clamp_dt(dt);
        if !self.paused {
            let scaled = dt * self.speed;
            self.sim_time += scaled as f64;
            let mut ctx = SceneContext::new(&mut self.scene, &mut self.camera);
            self.dispatcher.update(scaled, &mut ctx);
        }
        self.camera.update(dt);
    }

    /// One full frame: advance by `dt`, then draw.
    pub fn tick<S: FrameSink>(&mut self, dt: f32, sink: &mut S) -> Result<(), S::Error> {
        self.advance(dt);
        sink.draw(&self.scene, &self.camera.camera())
    }

    /// One full frame timed by the internal monotonic clock.
    pub fn frame<S: FrameSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        let dt = self.clock.tick();
        self.tick(dt, sink)
    }

    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Frames timed by [`App::frame`] so far.
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// True on the frames where the shells should log the frame rate.
    pub fn fps_log_due(&self) -> bool {
        let n = self.clock.frames();
        n > 0 && n % FPS_LOG_INTERVAL_FRAMES == 0
    }

    pub fn controls(&self) -> Vec<ControlDescriptor> {
        self.dispatcher.controls()
    }

    pub fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        self.dispatcher.set_control(key, value)
    }

    /// Ray-cast from a viewport pixel and forward any hit to the active
    /// animation.
    pub fn pick_screen(&mut self, sx: f32, sy: f32) -> Option<PickHit> {
        let (w, h) = self.viewport;
        let (origin, dir) = self.camera.screen_ray(sx, sy, w as f32, h as f32);
        let hit = self.scene.pick(origin, dir, PICK_SCALE)?;
        let mut ctx = SceneContext::new(&mut self.scene, &mut self.camera);
        let consumed = self.dispatcher.pick(&hit, &mut ctx);
        log::debug!("[pick] {} #{} consumed={}", hit.label, hit.sprite, consumed);
        Some(hit)
    }

    /// Drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.camera
            .orbit(-dx * ORBIT_RADIANS_PER_PIXEL, dy * ORBIT_RADIANS_PER_PIXEL);
    }

    /// Wheel delta in the browser's pixel units; positive zooms out.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.camera.zoom((wheel_delta * ZOOM_PER_WHEEL_UNIT).exp());
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn active_tag(&self) -> Option<&'static str> {
        self.dispatcher.active_tag()
    }

    pub fn phase_label(&self) -> Option<&'static str> {
        self.dispatcher.phase_label()
    }

    /// Simulation seconds since the current verse was shown.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}
