use super::{mix, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_DOWN, COLOR_PARTICLE, COLOR_UP, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, PickHit, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

pub(super) const TAG: &str = "entanglement";

const RING_DOTS: usize = 24;
const LINK_DOTS: usize = 48;
const REST_SEPARATION: f32 = 0.6;
const CORRELATIONS: &[&str] = &["opposite", "identical"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairStage {
    Correlated,
    Separating,
    Measured,
    Rejoining,
}

impl Phase for PairStage {
    fn next(self) -> Self {
        match self {
            Self::Correlated => Self::Separating,
            Self::Separating => Self::Measured,
            Self::Measured => Self::Rejoining,
            Self::Rejoining => Self::Correlated,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Correlated => 3.0,
            Self::Separating | Self::Measured | Self::Rejoining => 2.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Separation,
    Link,
    Reveal,
}

struct Parts {
    particles: NodeId,
    rings: NodeId,
    link: NodeId,
}

/// Two particles prepared together keep a shared spin outcome however
/// far apart they are pulled.
pub struct Entanglement {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<PairStage>,
    tweens: TweenSet<Prop>,
    rng: StdRng,
    distance: f32,
    correlation: usize,
    separation: f32,
    link: f32,
    reveal: f32,
    /// Spin of the left particle after measurement; `true` is up.
    left_up: bool,
    measured_by: Option<usize>,
    clock: f32,
}

impl Entanglement {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(PairStage::Correlated),
            tweens: TweenSet::new(),
            rng: seeded(TAG),
            distance: 4.0,
            correlation: 0,
            separation: REST_SEPARATION,
            link: 1.0,
            reveal: 0.0,
            left_up: true,
            measured_by: None,
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> PairStage {
        self.machine.current()
    }

    /// Measured spins as `(left_up, right_up)`, once revealed.
    pub fn outcome(&self) -> Option<(bool, bool)> {
        (self.machine.current() == PairStage::Measured).then(|| (self.left_up, self.right_up()))
    }

    fn right_up(&self) -> bool {
        if self.correlation == 0 {
            !self.left_up
        } else {
            self.left_up
        }
    }

    fn enter(&mut self, stage: PairStage) {
        match stage {
            PairStage::Correlated => {
                self.measured_by = None;
                self.tweens.start(Prop::Link, self.link, 1.0, 0.8, Easing::QuadraticOut);
            }
            PairStage::Separating => {
                self.tweens
                    .start(Prop::Separation, self.separation, self.distance, 2.2, Easing::CubicInOut);
            }
            PairStage::Measured => {
                let first_up = self.rng.gen_bool(0.5);
                // The picked particle is the one whose outcome is drawn.
                self.left_up = match self.measured_by {
                    Some(1) if self.correlation == 0 => !first_up,
                    _ => first_up,
                };
                log::debug!(
                    "[entanglement] measured left={} right={}",
                    self.left_up,
                    self.right_up()
                );
                self.tweens.start(Prop::Reveal, 0.0, 1.0, 0.35, Easing::QuadraticOut);
                self.tweens.start(Prop::Link, self.link, 0.0, 0.6, Easing::QuadraticIn);
            }
            PairStage::Rejoining => {
                self.tweens.start(Prop::Reveal, self.reveal, 0.0, 1.5, Easing::SineInOut);
                self.tweens
                    .start(Prop::Separation, self.separation, REST_SEPARATION, 2.2, Easing::CubicInOut);
            }
        }
    }

    fn measure(&mut self, which: usize) {
        if matches!(self.machine.current(), PairStage::Correlated | PairStage::Separating) {
            self.measured_by = Some(which);
            self.machine.force(PairStage::Measured);
            self.enter(PairStage::Measured);
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let half = self.separation * 0.5;
        let centers = [Vec3::new(-half, 0.0, 0.0), Vec3::new(half, 0.0, 0.0)];
        let spins = [self.left_up, self.right_up()];
        let up = rgba(COLOR_UP, 1.0);
        let down = rgba(COLOR_DOWN, 1.0);
        let unknown = rgba(COLOR_PARTICLE, 1.0);

        if let Some(sprites) = ctx.scene.sprites_mut(parts.particles) {
            for (i, s) in sprites.iter_mut().enumerate() {
                let known = if spins[i] { up } else { down };
                s.position = centers[i];
                s.size = 0.55 + 0.1 * self.reveal;
                s.color = mix(unknown, known, self.reveal);
            }
        }

        if let Some(sprites) = ctx.scene.sprites_mut(parts.rings) {
            for (i, s) in sprites.iter_mut().enumerate() {
                let side = i / RING_DOTS;
                let k = (i % RING_DOTS) as f32 / RING_DOTS as f32;
                // Unmeasured rings precess; measured ones settle into a tilt.
                let wobble = (1.0 - self.reveal) * (self.clock * 1.7 + side as f32 * 1.3).sin();
                let lean = if spins[side] { 0.35 } else { -0.35 };
                let tilt = lean * self.reveal + 0.6 * wobble;
                let a = k * TAU + self.clock * (1.0 - self.reveal) * 2.0;
                let local = Vec3::new(a.cos(), a.sin() * tilt.sin(), a.sin() * tilt.cos()) * 0.55;
                s.position = centers[side] + local;
                s.size = 0.07;
                let known = if spins[side] { up } else { down };
                let mut c = mix(rgba(COLOR_WAVE, 1.0), known, self.reveal);
                c.w = 0.55;
                s.color = c;
            }
        }

        if let Some(sprites) = ctx.scene.sprites_mut(parts.link) {
            for (i, s) in sprites.iter_mut().enumerate() {
                let t = (i as f32 + 0.5) / LINK_DOTS as f32;
                let pulse = 0.5 + 0.5 * (t * 12.0 - self.clock * 4.0).sin();
                s.position = centers[0].lerp(centers[1], t) + Vec3::Y * 0.08 * pulse;
                s.size = 0.05;
                s.color = Vec4::new(0.75, 0.6, 1.0, self.link * (0.25 + 0.45 * pulse));
            }
        }
    }
}

impl Default for Entanglement {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Entanglement {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        let particles = self.nodes.add(ctx.scene, TAG, "particles", 2);
        if let Some(node) = ctx.scene.node_mut(particles) {
            node.pickable = true;
        }
        let rings = self.nodes.add(ctx.scene, TAG, "rings", RING_DOTS * 2);
        let link = self.nodes.add(ctx.scene, TAG, "link", LINK_DOTS);
        self.parts = Some(Parts {
            particles,
            rings,
            link,
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
        let (mut sep, mut link, mut reveal) = (self.separation, self.link, self.reveal);
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Separation => sep = v,
            Prop::Link => link = v,
            Prop::Reveal => reveal = v,
        });
        self.separation = sep;
        self.link = link;
        self.reveal = reveal;
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("distance", "Separation", 2.0, 6.0, 0.1, self.distance),
            ControlDescriptor::choice("correlation", "Correlation", CORRELATIONS, self.correlation),
            ControlDescriptor::button("measure", "Measure left"),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("distance", ControlValue::Number(v)) => self.distance = v,
            ("correlation", ControlValue::Choice(i)) => self.correlation = i,
            ("measure", _) => self.measure(0),
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
        self.nodes.release_all(ctx.scene);
        self.parts = None;
    }

    fn on_pick(&mut self, hit: &PickHit, _ctx: &mut SceneContext<'_>) -> bool {
        let ours = self.parts.as_ref().is_some_and(|p| p.particles == hit.node);
        if !ours {
            return false;
        }
        let before = self.machine.transitions();
        self.measure(hit.sprite.min(1));
        self.machine.transitions() != before
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match self.machine.current() {
            PairStage::Correlated => "correlated",
            PairStage::Separating => "separating",
            PairStage::Measured => match (self.left_up, self.right_up()) {
                (true, false) => "measured: up / down",
                (false, true) => "measured: down / up",
                (true, true) => "measured: up / up",
                (false, false) => "measured: down / down",
            },
            PairStage::Rejoining => "rejoining",
        })
    }
}

impl Entanglement {
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.rng = seeded(TAG);
        self.separation = REST_SEPARATION;
        self.link = 1.0;
        self.reveal = 0.0;
        self.measured_by = None;
        self.clock = 0.0;
    }
}
