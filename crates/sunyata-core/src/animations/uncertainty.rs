use super::{gaussian, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_PARTICLE, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::Vec3;

pub(super) const TAG: &str = "uncertainty";

const CLOUD: usize = 300;
const BAR_DOTS: usize = 32;
/// Reduced Planck constant in scene units.
pub const HBAR: f32 = 1.0;
const MIN_WIDTH: f32 = 0.2;
const MAX_WIDTH: f32 = 2.0;
const POSITION_CENTER: Vec3 = Vec3::new(-2.2, 0.0, 0.0);
const MOMENTUM_CENTER: Vec3 = Vec3::new(2.2, 0.0, 0.0);

/// Smallest momentum spread allowed for a position spread `sigma_x`.
pub fn momentum_spread(sigma_x: f32) -> f32 {
    HBAR / (2.0 * sigma_x.max(1e-3))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqueezeStage {
    Squeezing,
    HoldingNarrow,
    Relaxing,
    HoldingWide,
}

impl Phase for SqueezeStage {
    fn next(self) -> Self {
        match self {
            Self::Squeezing => Self::HoldingNarrow,
            Self::HoldingNarrow => Self::Relaxing,
            Self::Relaxing => Self::HoldingWide,
            Self::HoldingWide => Self::Squeezing,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Squeezing | Self::Relaxing => 3.0,
            Self::HoldingNarrow | Self::HoldingWide => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Width,
}

struct Parts {
    position: NodeId,
    momentum: NodeId,
    bars: NodeId,
}

/// Squeezing a particle's position spread widens its momentum spread;
/// the product never drops below `HBAR / 2`.
pub struct Uncertainty {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<SqueezeStage>,
    tweens: TweenSet<Prop>,
    /// Unit-variance samples reused every frame and scaled by the spreads.
    samples: Vec<Vec3>,
    width: f32,
    auto: bool,
    clock: f32,
}

impl Uncertainty {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(SqueezeStage::Squeezing),
            tweens: TweenSet::new(),
            samples: Vec::new(),
            width: 1.0,
            auto: true,
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> SqueezeStage {
        self.machine.current()
    }

    /// Current `(sigma_x, sigma_p)`.
    pub fn spreads(&self) -> (f32, f32) {
        (self.width, momentum_spread(self.width))
    }

    fn enter(&mut self, stage: SqueezeStage) {
        if !self.auto {
            return;
        }
        match stage {
            SqueezeStage::Squeezing => {
                self.tweens
                    .start(Prop::Width, self.width, MIN_WIDTH + 0.1, stage.dwell(), Easing::CubicInOut);
            }
            SqueezeStage::Relaxing => {
                self.tweens
                    .start(Prop::Width, self.width, MAX_WIDTH - 0.4, stage.dwell(), Easing::CubicInOut);
            }
            SqueezeStage::HoldingNarrow | SqueezeStage::HoldingWide => {}
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let (sx, sp) = self.spreads();
        let breathe = 1.0 + 0.03 * (self.clock * 2.0).sin();
        if let Some(sprites) = ctx.scene.sprites_mut(parts.position) {
            let color = rgba(COLOR_WAVE, 0.75);
            for (s, u) in sprites.iter_mut().zip(&self.samples) {
                s.position = POSITION_CENTER + Vec3::new(u.x * sx, u.y * 0.35, u.z * 0.35) * breathe;
                s.size = 0.07;
                s.color = color;
            }
        }
        if let Some(sprites) = ctx.scene.sprites_mut(parts.momentum) {
            let color = rgba(COLOR_PARTICLE, 0.75);
            for (s, u) in sprites.iter_mut().zip(self.samples.iter().rev()) {
                s.position = MOMENTUM_CENTER + Vec3::new(u.x * sp.min(3.0), u.y * 0.35, u.z * 0.35) * breathe;
                s.size = 0.07;
                s.color = color;
            }
        }
        if let Some(sprites) = ctx.scene.sprites_mut(parts.bars) {
            for (i, s) in sprites.iter_mut().enumerate() {
                let (center, spread, rgb) = if i < BAR_DOTS {
                    (POSITION_CENTER, sx, COLOR_WAVE)
                } else {
                    (MOMENTUM_CENTER, sp.min(3.0), COLOR_PARTICLE)
                };
                let k = (i % BAR_DOTS) as f32 / (BAR_DOTS - 1) as f32;
                s.position = center + Vec3::new((k * 2.0 - 1.0) * spread, -1.6, 0.0);
                s.size = 0.05;
                s.color = rgba(rgb, 0.9);
            }
        }
    }
}

impl Default for Uncertainty {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Uncertainty {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        let mut rng = seeded(TAG);
        self.samples = (0..CLOUD)
            .map(|_| Vec3::new(gaussian(&mut rng), gaussian(&mut rng), gaussian(&mut rng)))
            .collect();
        let position = self.nodes.add(ctx.scene, TAG, "position", CLOUD);
        let momentum = self.nodes.add(ctx.scene, TAG, "momentum", CLOUD);
        let bars = self.nodes.add(ctx.scene, TAG, "spread bars", BAR_DOTS * 2);
        self.parts = Some(Parts {
            position,
            momentum,
            bars,
        });
        self.restart();
        self.write(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) {
        if self.parts.is_none() {
            return;
        }
        self.clock += dt;
        if self.auto {
            if let Some(stage) = self.machine.advance(dt) {
                self.enter(stage);
            }
        }
        let mut width = self.width;
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Width => width = v,
        });
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("width", "Position spread", MIN_WIDTH, MAX_WIDTH, 0.05, self.width),
            ControlDescriptor::toggle("auto", "Animate squeeze", self.auto),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("width", ControlValue::Number(v)) => {
                // Manual input takes over from the automatic squeeze.
                self.auto = false;
                self.tweens.cancel_all();
                self.width = v;
            }
            ("auto", ControlValue::Bool(v)) => {
                self.auto = v;
                if v {
                    self.machine.reset();
                    self.enter(self.machine.current());
                } else {
                    self.tweens.cancel_all();
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

    fn phase_label(&self) -> Option<&'static str> {
        if !self.auto {
            return Some("manual");
        }
        Some(match self.machine.current() {
            SqueezeStage::Squeezing => "squeezing position",
            SqueezeStage::HoldingNarrow => "sharp position, broad momentum",
            SqueezeStage::Relaxing => "relaxing",
            SqueezeStage::HoldingWide => "broad position, sharp momentum",
        })
    }
}

impl Uncertainty {
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.width = 1.0;
        self.clock = 0.0;
        let first = self.machine.current();
        self.enter(first);
    }
}
