use super::{gaussian, mix, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_ENV, COLOR_PARTICLE, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::particles::ParticlePool;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

pub(super) const TAG: &str = "decoherence";

const RING_SPRITES: usize = 96;
const ENV_CAPACITY: usize = 160;
const RING_RADIUS: f32 = 1.6;
const SHIELD_FLOOR: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoherenceStage {
    Protected,
    Threatened,
    Broken,
    Recovering,
}

impl Phase for DecoherenceStage {
    fn next(self) -> Self {
        match self {
            Self::Protected => Self::Threatened,
            Self::Threatened => Self::Broken,
            Self::Broken => Self::Recovering,
            Self::Recovering => Self::Protected,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Protected => 3.5,
            Self::Threatened | Self::Broken => 2.5,
            Self::Recovering => 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Coherence,
}

struct Parts {
    ring: NodeId,
    env: NodeId,
}

/// A coherent ring of phase that smears into noise as environment
/// particles strike it.
pub struct Decoherence {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<DecoherenceStage>,
    tweens: TweenSet<Prop>,
    rng: StdRng,
    env: ParticlePool,
    /// Fixed per-sprite noise so broken phase looks stable frame to frame.
    jitter: Vec<Vec3>,
    coupling: f32,
    shield: bool,
    coherence: f32,
    spawn_accum: f32,
    clock: f32,
}

impl Decoherence {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(DecoherenceStage::Protected),
            tweens: TweenSet::new(),
            rng: seeded(TAG),
            env: ParticlePool::new(ENV_CAPACITY),
            jitter: Vec::new(),
            coupling: 0.6,
            shield: false,
            coherence: 1.0,
            spawn_accum: 0.0,
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> DecoherenceStage {
        self.machine.current()
    }

    /// Current coherence in `[0, 1]` after the shield floor is applied.
    pub fn coherence(&self) -> f32 {
        if self.shield {
            self.coherence.max(SHIELD_FLOOR)
        } else {
            self.coherence
        }
    }

    pub fn environment_alive(&self) -> usize {
        self.env.alive()
    }

    fn enter(&mut self, stage: DecoherenceStage) {
        let (target, secs, easing) = match stage {
            DecoherenceStage::Protected => return,
            DecoherenceStage::Threatened => (1.0 - 0.3 * self.coupling, 2.0, Easing::SineInOut),
            DecoherenceStage::Broken => (1.0 - self.coupling, 1.2, Easing::QuadraticOut),
            DecoherenceStage::Recovering => (1.0, 2.6, Easing::CubicInOut),
        };
        self.tweens.start(Prop::Coherence, self.coherence, target, secs, easing);
    }

    /// Environment particles per second for the current stage.
    fn spawn_rate(&self) -> f32 {
        let base = match self.machine.current() {
            DecoherenceStage::Protected => 4.0,
            DecoherenceStage::Threatened => 30.0,
            DecoherenceStage::Broken => 55.0,
            DecoherenceStage::Recovering => 8.0,
        };
        base * (0.25 + self.coupling)
    }

    fn spawn_env(&mut self) {
        let dir = Vec3::new(gaussian(&mut self.rng), gaussian(&mut self.rng) * 0.4, gaussian(&mut self.rng))
            .normalize_or_zero();
        let dir = if dir == Vec3::ZERO { Vec3::X } else { dir };
        let start = dir * 5.5;
        let aim = Vec3::new(self.rng.gen_range(-0.4..0.4), 0.0, self.rng.gen_range(-0.4..0.4));
        let speed = self.rng.gen_range(2.5..4.5);
        let vel = (aim - start).normalize_or_zero() * speed;
        self.env.spawn(start, vel, 10.0 / speed, 0.0);
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let coherence = self.coherence();
        let disorder = 1.0 - coherence;
        if let Some(sprites) = ctx.scene.sprites_mut(parts.ring) {
            let coherent = rgba(COLOR_WAVE, 0.9);
            let mixed = rgba(COLOR_PARTICLE, 0.45);
            for (i, s) in sprites.iter_mut().enumerate() {
                let a = i as f32 / RING_SPRITES as f32 * TAU;
                let wave = (a * 3.0 - self.clock * 2.0).sin() * 0.25 * coherence;
                let base = Vec3::new(a.cos() * RING_RADIUS, wave, a.sin() * RING_RADIUS);
                let noise = self.jitter.get(i).copied().unwrap_or(Vec3::ZERO);
                s.position = base + noise * disorder * 1.4;
                s.size = 0.09 + 0.04 * coherence;
                s.color = mix(coherent, mixed, disorder);
            }
        }
        if let Some(node) = ctx.scene.node_mut(parts.env) {
            let color = rgba(COLOR_ENV, 0.8);
            let sprites = node.sprites_mut();
            let mut n = 0;
            for (_, p) in self.env.iter_alive() {
                if let Some(s) = sprites.get_mut(n) {
                    s.position = p.position;
                    s.size = 0.06;
                    s.color = color;
                    n += 1;
                }
            }
            node.set_active(n);
        }
    }
}

impl Default for Decoherence {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Decoherence {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        self.rng = seeded(TAG);
        self.jitter = (0..RING_SPRITES)
            .map(|_| Vec3::new(gaussian(&mut self.rng), gaussian(&mut self.rng), gaussian(&mut self.rng)) * 0.5)
            .collect();
        let ring = self.nodes.add(ctx.scene, TAG, "ring", RING_SPRITES);
        let env = self.nodes.add(ctx.scene, TAG, "environment", ENV_CAPACITY);
        self.parts = Some(Parts { ring, env });
        self.restart();
        self.write(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) {
        if self.parts.is_none() {
            return;
        }
        self.clock += dt;
        if let Some(stage) = self.machine.advance(dt) {
            self.enter(stage);
        }
        let mut coherence = self.coherence;
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Coherence => coherence = v,
        });
        self.coherence = coherence;

        self.spawn_accum += dt * self.spawn_rate();
        while self.spawn_accum >= 1.0 {
            self.spawn_accum -= 1.0;
            if self.env.is_full() {
                self.spawn_accum = 0.0;
                break;
            }
            self.spawn_env();
        }
        self.env.step(dt, |_| Vec3::ZERO);
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("coupling", "Environment coupling", 0.0, 1.0, 0.05, self.coupling),
            ControlDescriptor::toggle("shield", "Isolate system", self.shield),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("coupling", ControlValue::Number(v)) => self.coupling = v,
            ("shield", ControlValue::Bool(v)) => self.shield = v,
            _ => {}
        }
        Ok(())
    }

    fn reset(&mut self, ctx: &mut SceneContext<'_>) {
        self.restart();
        self.write(ctx);
    }

    fn dispose(&mut self, ctx: &mut SceneContext<'_>) {
        self.tweens.cancel_all();
        self.env.clear();
        self.nodes.release_all(ctx.scene);
        self.parts = None;
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match self.machine.current() {
            DecoherenceStage::Protected => "coherent",
            DecoherenceStage::Threatened => "environment coupling",
            DecoherenceStage::Broken => "decohered",
            DecoherenceStage::Recovering => "re-isolating",
        })
    }
}

impl Decoherence {
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.env.clear();
        self.coherence = 1.0;
        self.spawn_accum = 0.0;
        self.clock = 0.0;
    }
}
