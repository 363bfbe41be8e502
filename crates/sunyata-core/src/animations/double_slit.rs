use super::{gaussian, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_BARRIER, COLOR_DOWN, COLOR_PARTICLE, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::particles::ParticlePool;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, SceneContext};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::PI;

pub(super) const TAG: &str = "double_slit";

const IN_FLIGHT: usize = 400;
const MAX_HITS: usize = 1200;
const WALL_SPRITES: usize = 64;
const SOURCE_X: f32 = -4.0;
const SCREEN_X: f32 = 4.0;
const SCREEN_HALF: f32 = 3.0;
const SPEED: f32 = 4.0;
const WAVELENGTH: f32 = 0.25;
const SLIT_WIDTH: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitterStage {
    Emitting,
    Fading,
}

impl Phase for EmitterStage {
    fn next(self) -> Self {
        match self {
            Self::Emitting => Self::Fading,
            Self::Fading => Self::Emitting,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Emitting => 12.0,
            Self::Fading => 1.5,
        }
    }
}

/// Relative screen intensity at height `y` for two slits `separation`
/// apart: two-slit fringes under a single-slit envelope.
pub fn fringe_intensity(y: f32, separation: f32) -> f32 {
    let scale = PI / (WAVELENGTH * SCREEN_X);
    let fringe = (scale * separation * y).cos().powi(2);
    let beta = scale * SLIT_WIDTH * y;
    let envelope = if beta.abs() < 1e-4 { 1.0 } else { (beta.sin() / beta).powi(2) };
    fringe * envelope
}

#[derive(Clone, Copy, Debug, Default)]
struct Flight {
    target: Vec3,
    turned: bool,
}

struct Parts {
    particles: NodeId,
    hits: NodeId,
    wall: NodeId,
    detector: NodeId,
}

/// Single particles sent through two slits build up either fringes or
/// two bands depending on whether the path is watched.
pub struct DoubleSlit {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<EmitterStage>,
    rng: StdRng,
    pool: ParticlePool,
    flights: Vec<Flight>,
    hits: Vec<Vec3>,
    hit_head: usize,
    observe: bool,
    separation: f32,
    rate: f32,
    emit_accum: f32,
}

impl DoubleSlit {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(EmitterStage::Emitting),
            rng: seeded(TAG),
            pool: ParticlePool::new(IN_FLIGHT),
            flights: Vec::new(),
            hits: Vec::new(),
            hit_head: 0,
            observe: false,
            separation: 1.0,
            rate: 40.0,
            emit_accum: 0.0,
        }
    }

    pub fn stage(&self) -> EmitterStage {
        self.machine.current()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn in_flight(&self) -> usize {
        self.pool.alive()
    }

    /// Recorded screen hits, oldest first once the buffer has wrapped.
    pub fn hits(&self) -> impl Iterator<Item = Vec3> + '_ {
        let (newer, older) = self.hits.split_at(self.hit_head.min(self.hits.len()));
        older.iter().chain(newer.iter()).copied()
    }

    fn clear_hits(&mut self) {
        self.hits.clear();
        self.hit_head = 0;
    }

    fn record_hit(&mut self, p: Vec3) {
        if self.hits.len() < MAX_HITS {
            self.hits.push(p);
        } else {
            self.hits[self.hit_head] = p;
            self.hit_head = (self.hit_head + 1) % MAX_HITS;
        }
    }

    fn sample_screen_y(&mut self, slit_y: f32) -> f32 {
        if self.observe {
            // Straight path from the source through the slit, blurred.
            let y = slit_y * (SCREEN_X - SOURCE_X) / -SOURCE_X + gaussian(&mut self.rng) * 0.3;
            return y.clamp(-SCREEN_HALF, SCREEN_HALF);
        }
        for _ in 0..64 {
            let y = self.rng.gen_range(-SCREEN_HALF..SCREEN_HALF);
            if self.rng.gen::<f32>() < fringe_intensity(y, self.separation) {
                return y;
            }
        }
        0.0
    }

    fn emit(&mut self) {
        let slit_y = if self.rng.gen_bool(0.5) { 0.5 } else { -0.5 } * self.separation;
        let screen_y = self.sample_screen_y(slit_y);
        let z = gaussian(&mut self.rng) * 0.25;
        let start = Vec3::new(SOURCE_X, 0.0, 0.0);
        let vel = (Vec3::new(0.0, slit_y, z * 0.5) - start).normalize_or_zero() * SPEED;
        if let Some(i) = self.pool.spawn(start, vel, 10.0, slit_y) {
            if let Some(f) = self.flights.get_mut(i) {
                *f = Flight {
                    target: Vec3::new(SCREEN_X, screen_y, z),
                    turned: false,
                };
            }
        }
    }

    fn fly(&mut self, dt: f32) {
        self.pool.step(dt, |_| Vec3::ZERO);
        for i in 0..self.pool.capacity() {
            let Some(p) = self.pool.get_mut(i) else {
                continue;
            };
            let Some(f) = self.flights.get_mut(i) else {
                continue;
            };
            if !f.turned && p.position.x >= 0.0 {
                f.turned = true;
                p.velocity = (f.target - p.position).normalize_or_zero() * SPEED;
            }
            if p.position.x >= SCREEN_X {
                let at = f.target;
                self.pool.kill(i);
                self.record_hit(at);
            }
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let fading = self.machine.current() == EmitterStage::Fading;
        let fade = if fading { 1.0 - self.machine.progress() } else { 1.0 };

        if let Some(node) = ctx.scene.node_mut(parts.particles) {
            let color = rgba(if self.observe { COLOR_PARTICLE } else { COLOR_WAVE }, 0.9);
            let sprites = node.sprites_mut();
            let mut n = 0;
            for (_, p) in self.pool.iter_alive() {
                if let Some(s) = sprites.get_mut(n) {
                    s.position = p.position;
                    s.size = 0.08;
                    s.color = color;
                    n += 1;
                }
            }
            node.set_active(n);
        }

        if let Some(node) = ctx.scene.node_mut(parts.hits) {
            let color = rgba(COLOR_PARTICLE, 0.75);
            let sprites = node.sprites_mut();
            for (s, h) in sprites.iter_mut().zip(&self.hits) {
                s.position = *h;
                s.size = 0.07;
                s.color = color;
            }
            node.set_active(self.hits.len());
            node.opacity = fade;
        }

        if let Some(node) = ctx.scene.node_mut(parts.wall) {
            let slits = [self.separation * 0.5, -self.separation * 0.5];
            let color = rgba(COLOR_BARRIER, 0.6);
            let sprites = node.sprites_mut();
            let mut n = 0;
            for k in 0..WALL_SPRITES {
                let y = -SCREEN_HALF + 2.0 * SCREEN_HALF * (k as f32 + 0.5) / WALL_SPRITES as f32;
                if slits.iter().any(|s| (y - s).abs() < SLIT_WIDTH) {
                    continue;
                }
                if let Some(s) = sprites.get_mut(n) {
                    s.position = Vec3::new(0.0, y, 0.0);
                    s.size = 0.12;
                    s.color = color;
                    n += 1;
                }
            }
            node.set_active(n);
        }

        if let Some(node) = ctx.scene.node_mut(parts.detector) {
            node.visible = self.observe;
            let color = rgba(COLOR_DOWN, 0.9);
            for (i, s) in node.sprites_mut().iter_mut().enumerate() {
                let y = if i == 0 { 0.5 } else { -0.5 } * self.separation;
                s.position = Vec3::new(0.25, y, 0.35);
                s.size = 0.16;
                s.color = color;
            }
        }
    }
}

impl Default for DoubleSlit {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for DoubleSlit {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        self.flights = vec![Flight::default(); IN_FLIGHT];
        self.hits = Vec::with_capacity(MAX_HITS);
        let particles = self.nodes.add(ctx.scene, TAG, "particles", IN_FLIGHT);
        let hits = self.nodes.add(ctx.scene, TAG, "screen", MAX_HITS);
        let wall = self.nodes.add(ctx.scene, TAG, "wall", WALL_SPRITES);
        let detector = self.nodes.add(ctx.scene, TAG, "detector", 2);
        self.parts = Some(Parts {
            particles,
            hits,
            wall,
            detector,
        });
        self.restart();
        self.write(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) {
        if self.parts.is_none() {
            return;
        }
        if let Some(stage) = self.machine.advance(dt) {
            if stage == EmitterStage::Emitting {
                self.clear_hits();
            }
        }
        if self.machine.current() == EmitterStage::Emitting {
            self.emit_accum += dt * self.rate;
            while self.emit_accum >= 1.0 {
                self.emit_accum -= 1.0;
                if self.pool.is_full() {
                    self.emit_accum = 0.0;
                    break;
                }
                self.emit();
            }
        }
        self.fly(dt);
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::toggle("observe", "Watch the slits", self.observe),
            ControlDescriptor::slider("separation", "Slit separation", 0.4, 2.0, 0.05, self.separation),
            ControlDescriptor::slider("rate", "Particles per second", 5.0, 80.0, 1.0, self.rate),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("observe", ControlValue::Bool(v)) => {
                if v != self.observe {
                    self.observe = v;
                    self.clear_hits();
                }
            }
            ("separation", ControlValue::Number(v)) => {
                self.separation = v;
                self.clear_hits();
            }
            ("rate", ControlValue::Number(v)) => self.rate = v,
            _ => {}
        }
        Ok(())
    }

    fn reset(&mut self, ctx: &mut SceneContext<'_>) {
        self.restart();
        self.write(ctx);
    }

    fn dispose(&mut self, ctx: &mut SceneContext<'_>) {
        self.pool.clear();
        self.clear_hits();
        self.nodes.release_all(ctx.scene);
        self.parts = None;
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match (self.machine.current(), self.observe) {
            (EmitterStage::Fading, _) => "clearing screen",
            (EmitterStage::Emitting, false) => "unobserved: interference",
            (EmitterStage::Emitting, true) => "observed: two bands",
        })
    }
}

impl DoubleSlit {
    fn restart(&mut self) {
        self.machine.reset();
        self.rng = seeded(TAG);
        self.pool.clear();
        self.clear_hits();
        self.emit_accum = 0.0;
    }
}
