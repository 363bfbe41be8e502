use super::{fibonacci_sphere, mix, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_DOWN, COLOR_PARTICLE, COLOR_UP, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::particles::ParticlePool;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

pub(super) const TAG: &str = "vacuum_fluctuation";

const PAIR_CAPACITY: usize = 300;
const FLASH_CAPACITY: usize = 64;
const GRID: usize = 20;
const GRID_SPAN: f32 = 8.0;
const FIELD_Y: f32 = -2.2;
const SPAWN_RADIUS: f32 = 2.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStage {
    Calm,
    Surging,
    Settling,
}

impl Phase for FieldStage {
    fn next(self) -> Self {
        match self {
            Self::Calm => Self::Surging,
            Self::Surging => Self::Settling,
            Self::Settling => Self::Calm,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Calm => 3.0,
            Self::Surging => 2.5,
            Self::Settling => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Amplitude,
}

struct Parts {
    pairs: NodeId,
    flashes: NodeId,
    field: NodeId,
}

/// Empty space that is never quite empty: particle pairs borrow energy,
/// separate briefly and annihilate in a flash.
pub struct VacuumFluctuation {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<FieldStage>,
    tweens: TweenSet<Prop>,
    rng: StdRng,
    pairs: ParticlePool,
    flashes: ParticlePool,
    energy: f32,
    show_field: bool,
    amplitude: f32,
    spawn_accum: f32,
    annihilations: u64,
    clock: f32,
}

impl VacuumFluctuation {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(FieldStage::Calm),
            tweens: TweenSet::new(),
            rng: seeded(TAG),
            pairs: ParticlePool::new(PAIR_CAPACITY),
            flashes: ParticlePool::new(FLASH_CAPACITY),
            energy: 1.0,
            show_field: true,
            amplitude: 0.3,
            spawn_accum: 0.0,
            annihilations: 0,
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> FieldStage {
        self.machine.current()
    }

    pub fn live_pairs(&self) -> usize {
        self.pairs.alive() / 2
    }

    pub fn annihilations(&self) -> u64 {
        self.annihilations
    }

    fn enter(&mut self, stage: FieldStage) {
        let target = match stage {
            FieldStage::Calm => 0.3,
            FieldStage::Surging => 1.0,
            FieldStage::Settling => 0.5,
        };
        self.tweens
            .start(Prop::Amplitude, self.amplitude, target, stage.dwell() * 0.6, Easing::SineInOut);
    }

    fn spawn_rate(&self) -> f32 {
        let base = match self.machine.current() {
            FieldStage::Calm => 12.0,
            FieldStage::Surging => 45.0,
            FieldStage::Settling => 20.0,
        };
        base * self.energy
    }

    /// Spawn both members of a pair or neither.
    fn spawn_pair(&mut self) {
        if self.pairs.capacity() - self.pairs.alive() < 2 {
            return;
        }
        let center = fibonacci_sphere(self.rng.gen_range(0..256), 256)
            * SPAWN_RADIUS
            * self.rng.gen::<f32>().sqrt();
        let axis = fibonacci_sphere(self.rng.gen_range(0..128), 128);
        let speed = self.rng.gen_range(0.6..1.4) * self.energy.sqrt();
        // Higher energy borrowed means a shorter life.
        let lifetime = self.rng.gen_range(0.6..1.4) / self.energy.max(0.2).sqrt();
        self.pairs.spawn(center, axis * speed, lifetime, 1.0);
        self.pairs.spawn(center, -axis * speed, lifetime, -1.0);
    }

    fn step_pairs(&mut self, dt: f32) {
        for i in 0..self.pairs.capacity() {
            let Some(p) = self.pairs.get(i) else {
                continue;
            };
            // One flash per pair, from the positive member.
            if p.tag > 0.0 && p.age + dt >= p.lifetime {
                self.flashes.spawn(p.position, Vec3::ZERO, 0.35, 0.0);
                self.annihilations += 1;
            }
        }
        // Members slow to a stop as their borrowed time runs out.
        self.pairs.step(dt, |p| {
            let turn = (p.life_fraction() - 0.5).max(0.0) * 2.0;
            -p.velocity * (1.5 + 6.0 * turn)
        });
        self.flashes.step(dt, |_| Vec3::ZERO);
    }

    fn field_height(&self, x: f32, z: f32) -> f32 {
        let t = self.clock;
        let a = (x * 1.3 + t * 1.1).sin() * (z * 0.9 - t * 0.7).cos();
        let b = (x * 0.5 - z * 1.7 + t * 1.9).sin() * 0.5;
        (a + b) * self.amplitude * 0.35 * self.energy.min(2.0)
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        if let Some(node) = ctx.scene.node_mut(parts.pairs) {
            let plus = rgba(COLOR_UP, 0.9);
            let minus = rgba(COLOR_DOWN, 0.9);
            let sprites = node.sprites_mut();
            let mut n = 0;
            for (_, p) in self.pairs.iter_alive() {
                if let Some(s) = sprites.get_mut(n) {
                    let life = p.life_fraction();
                    s.position = p.position;
                    s.size = 0.05 + 0.06 * (1.0 - (2.0 * life - 1.0).abs());
                    let mut c = if p.tag > 0.0 { plus } else { minus };
                    c.w *= 1.0 - life * life;
                    s.color = c;
                    n += 1;
                }
            }
            node.set_active(n);
        }
        if let Some(node) = ctx.scene.node_mut(parts.flashes) {
            let sprites = node.sprites_mut();
            let mut n = 0;
            for (_, p) in self.flashes.iter_alive() {
                if let Some(s) = sprites.get_mut(n) {
                    let life = p.life_fraction();
                    s.position = p.position;
                    s.size = 0.15 + 0.5 * life;
                    s.color = rgba(COLOR_PARTICLE, 1.0 - life);
                    n += 1;
                }
            }
            node.set_active(n);
        }
        if let Some(node) = ctx.scene.node_mut(parts.field) {
            node.visible = self.show_field;
            if self.show_field {
                let calm = rgba(COLOR_WAVE, 0.35);
                let hot = rgba(COLOR_PARTICLE, 0.7);
                for (i, s) in node.sprites_mut().iter_mut().enumerate() {
                    let gx = (i % GRID) as f32 / (GRID - 1) as f32 - 0.5;
                    let gz = (i / GRID) as f32 / (GRID - 1) as f32 - 0.5;
                    let (x, z) = (gx * GRID_SPAN, gz * GRID_SPAN);
                    let h = self.field_height(x, z);
                    s.position = Vec3::new(x, FIELD_Y + h, z);
                    s.size = 0.08;
                    s.color = mix(calm, hot, h.abs() * 2.0);
                }
            }
        }
    }
}

impl Default for VacuumFluctuation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for VacuumFluctuation {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        let pairs = self.nodes.add(ctx.scene, TAG, "pairs", PAIR_CAPACITY);
        let flashes = self.nodes.add(ctx.scene, TAG, "flashes", FLASH_CAPACITY);
        let field = self.nodes.add(ctx.scene, TAG, "field", GRID * GRID);
        self.parts = Some(Parts {
            pairs,
            flashes,
            field,
        });
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
        let mut amplitude = self.amplitude;
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Amplitude => amplitude = v,
        });
        self.amplitude = amplitude;

        self.spawn_accum += dt * self.spawn_rate();
        while self.spawn_accum >= 1.0 {
            self.spawn_accum -= 1.0;
            self.spawn_pair();
        }
        self.step_pairs(dt);
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("energy", "Fluctuation energy", 0.2, 3.0, 0.1, self.energy),
            ControlDescriptor::toggle("field", "Show field", self.show_field),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("energy", ControlValue::Number(v)) => self.energy = v,
            ("field", ControlValue::Bool(v)) => self.show_field = v,
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
        self.pairs.clear();
        self.flashes.clear();
        self.nodes.release_all(ctx.scene);
        self.parts = None;
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match self.machine.current() {
            FieldStage::Calm => "ground state",
            FieldStage::Surging => "fluctuating",
            FieldStage::Settling => "settling",
        })
    }
}

impl VacuumFluctuation {
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.rng = seeded(TAG);
        self.pairs.clear();
        self.flashes.clear();
        self.amplitude = 0.3;
        self.spawn_accum = 0.0;
        self.annihilations = 0;
        self.clock = 0.0;
    }
}
