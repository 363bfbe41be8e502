use super::{fibonacci_sphere, mix, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_DOWN, COLOR_UP};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, PickHit, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

pub(super) const TAG: &str = "superposition";

const CLOUD_POINTS: usize = 640;
const LOBE_OFFSET: f32 = 1.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuperpositionStage {
    Superposed,
    Measuring,
    Collapsed,
    Restoring,
}

impl Phase for SuperpositionStage {
    fn next(self) -> Self {
        match self {
            Self::Superposed => Self::Measuring,
            Self::Measuring => Self::Collapsed,
            Self::Collapsed => Self::Restoring,
            Self::Restoring => Self::Superposed,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Superposed => 4.0,
            Self::Measuring => 1.2,
            Self::Collapsed => 2.5,
            Self::Restoring => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Collapse,
}

#[derive(Clone, Copy)]
struct Seed {
    lobe: f32,
    dir: Vec3,
    radius: f32,
    freq: f32,
    phase: f32,
}

struct Parts {
    cloud: NodeId,
    axis: NodeId,
}

/// A two-lobed probability cloud that collapses onto one lobe when
/// measured, then spreads back out.
pub struct Superposition {
    nodes: NodeSet,
    parts: Option<Parts>,
    seeds: Vec<Seed>,
    machine: PhaseMachine<SuperpositionStage>,
    tweens: TweenSet<Prop>,
    rng: StdRng,
    /// Polar angle of the state on the Bloch sphere, in degrees.
    theta_deg: f32,
    spread: f32,
    collapse: f32,
    outcome_up: bool,
    clock: f32,
}

impl Superposition {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            seeds: Vec::new(),
            machine: PhaseMachine::new(SuperpositionStage::Superposed),
            tweens: TweenSet::new(),
            rng: seeded(TAG),
            theta_deg: 90.0,
            spread: 1.0,
            collapse: 0.0,
            outcome_up: true,
            clock: 0.0,
        }
    }

    /// Probability of measuring "up" for the current state.
    pub fn p_up(&self) -> f32 {
        let half = self.theta_deg.to_radians() * 0.5;
        half.cos().powi(2)
    }

    pub fn stage(&self) -> SuperpositionStage {
        self.machine.current()
    }

    pub fn collapse(&self) -> f32 {
        self.collapse
    }

    /// Back to the state right after construction: same seed, same cloud,
    /// same first measurement.
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.rng = seeded(TAG);
        let rng = &mut self.rng;
        self.seeds.clear();
        self.seeds.extend((0..CLOUD_POINTS).map(|i| Seed {
            lobe: if i % 2 == 0 { 1.0 } else { -1.0 },
            dir: fibonacci_sphere(i / 2, CLOUD_POINTS / 2),
            radius: 0.35 + 0.75 * rng.gen::<f32>().sqrt(),
            freq: 0.6 + 1.8 * rng.gen::<f32>(),
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }));
        self.collapse = 0.0;
        self.outcome_up = true;
        self.clock = 0.0;
    }

    fn enter(&mut self, stage: SuperpositionStage) {
        match stage {
            SuperpositionStage::Superposed => {}
            SuperpositionStage::Measuring => {
                self.outcome_up = self.rng.gen::<f32>() < self.p_up();
                log::debug!("[superposition] outcome up={}", self.outcome_up);
                self.tweens
                    .start(Prop::Collapse, self.collapse, 1.0, 1.0, Easing::QuadraticIn);
            }
            SuperpositionStage::Collapsed => {}
            SuperpositionStage::Restoring => {
                self.tweens
                    .start(Prop::Collapse, self.collapse, 0.0, 1.4, Easing::CubicInOut);
            }
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let p_up = self.p_up();
        let up = rgba(COLOR_UP, 1.0);
        let down = rgba(COLOR_DOWN, 1.0);
        let outcome = if self.outcome_up { up } else { down };
        let outcome_lobe = if self.outcome_up { 1.0 } else { -1.0 };
        if let Some(sprites) = ctx.scene.sprites_mut(parts.cloud) {
            for (s, seed) in sprites.iter_mut().zip(&self.seeds) {
                let wobble = 1.0 + 0.18 * (self.clock * seed.freq + seed.phase).sin();
                let r = seed.radius * self.spread * wobble;
                let home = Vec3::Y * seed.lobe * LOBE_OFFSET + seed.dir * r;
                let target = Vec3::Y * outcome_lobe * LOBE_OFFSET + seed.dir * r * 0.6;
                s.position = home.lerp(target, self.collapse);
                let weight = if seed.lobe > 0.0 { p_up } else { 1.0 - p_up };
                let own = if seed.lobe > 0.0 { up } else { down };
                let mut c = mix(own, outcome, self.collapse);
                c.w = (0.15 + 0.85 * weight) * (1.0 - self.collapse) + 0.9 * self.collapse;
                s.color = c;
                s.size = 0.09 + 0.05 * weight;
            }
        }
        if let Some(sprites) = ctx.scene.sprites_mut(parts.axis) {
            let n = sprites.len();
            for (i, s) in sprites.iter_mut().enumerate() {
                let y = -LOBE_OFFSET * 1.6 + 3.2 * LOBE_OFFSET * i as f32 / n.saturating_sub(1).max(1) as f32;
                s.position = Vec3::new(0.0, y, 0.0);
                s.size = 0.04;
                s.color = rgba([0.7, 0.7, 0.9], 0.25);
            }
        }
    }
}

impl Default for Superposition {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Superposition {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        self.restart();
        let cloud = self.nodes.add(ctx.scene, TAG, "cloud", CLOUD_POINTS);
        if let Some(node) = ctx.scene.node_mut(cloud) {
            node.pickable = true;
        }
        let axis = self.nodes.add(ctx.scene, TAG, "axis", 40);
        self.parts = Some(Parts { cloud, axis });
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
        let mut collapse = self.collapse;
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Collapse => collapse = v,
        });
        self.collapse = collapse;
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("theta", "State angle (deg)", 0.0, 180.0, 1.0, self.theta_deg),
            ControlDescriptor::slider("spread", "Cloud spread", 0.5, 2.0, 0.05, self.spread),
            ControlDescriptor::button("measure", "Measure now"),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("theta", ControlValue::Number(v)) => self.theta_deg = v,
            ("spread", ControlValue::Number(v)) => self.spread = v,
            ("measure", _) => {
                if self.machine.current() == SuperpositionStage::Superposed {
                    self.machine.force(SuperpositionStage::Measuring);
                    self.enter(SuperpositionStage::Measuring);
                }
            }
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
        let ours = self.parts.as_ref().is_some_and(|p| p.cloud == hit.node);
        if ours && self.machine.current() == SuperpositionStage::Superposed {
            self.machine.force(SuperpositionStage::Measuring);
            self.enter(SuperpositionStage::Measuring);
            return true;
        }
        false
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match self.machine.current() {
            SuperpositionStage::Superposed => "superposed",
            SuperpositionStage::Measuring => "measuring",
            SuperpositionStage::Collapsed => {
                if self.outcome_up {
                    "collapsed: up"
                } else {
                    "collapsed: down"
                }
            }
            SuperpositionStage::Restoring => "restoring",
        })
    }
}
