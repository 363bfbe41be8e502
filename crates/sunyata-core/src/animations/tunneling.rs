use super::{gaussian, seeded};
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_BARRIER, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, SceneContext};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

pub(super) const TAG: &str = "tunneling";

const PACKET_SPRITES: usize = 120;
const BARRIER_ROWS: usize = 12;
const BARRIER_COLS: usize = 6;
const START_X: f32 = -4.0;
const END_X: f32 = 4.0;
/// Decay constant per unit width at unit barrier height.
const KAPPA: f32 = 2.2;

/// Transmission through a square barrier in the thick-barrier limit,
/// `exp(-2 * kappa * width)` with kappa growing as `sqrt(height)`.
pub fn transmission_probability(height: f32, width: f32) -> f32 {
    let kappa = KAPPA * height.max(0.0).sqrt();
    (-2.0 * kappa * width.max(0.0)).exp().clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TunnelStage {
    Approaching,
    Tunneling,
    Transmitted,
    Resetting,
}

impl Phase for TunnelStage {
    fn next(self) -> Self {
        match self {
            Self::Approaching => Self::Tunneling,
            Self::Tunneling => Self::Transmitted,
            Self::Transmitted => Self::Resetting,
            Self::Resetting => Self::Approaching,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Approaching => 2.5,
            Self::Tunneling => 1.5,
            Self::Transmitted => 2.0,
            Self::Resetting => 1.0,
        }
    }
}

struct Parts {
    packet: NodeId,
    barrier: NodeId,
}

/// A wave packet meets a barrier it classically cannot cross and is
/// sometimes found on the far side.
pub struct Tunneling {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<TunnelStage>,
    rng: StdRng,
    offsets: Vec<Vec3>,
    height: f32,
    width: f32,
    transmitted: bool,
    attempts: u32,
    successes: u32,
    clock: f32,
}

impl Tunneling {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(TunnelStage::Approaching),
            rng: seeded(TAG),
            offsets: Vec::new(),
            height: 1.0,
            width: 0.3,
            transmitted: false,
            attempts: 0,
            successes: 0,
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> TunnelStage {
        self.machine.current()
    }

    /// `(successes, attempts)` since the last reset.
    pub fn tally(&self) -> (u32, u32) {
        (self.successes, self.attempts)
    }

    fn enter(&mut self, stage: TunnelStage) {
        if stage == TunnelStage::Tunneling {
            let p = transmission_probability(self.height, self.width);
            self.transmitted = self.rng.gen::<f32>() < p;
            self.attempts += 1;
            if self.transmitted {
                self.successes += 1;
            }
            log::debug!(
                "[tunneling] p={p:.3} transmitted={} ({}/{})",
                self.transmitted,
                self.successes,
                self.attempts
            );
        }
    }

    /// Packet center and how much of it has leaked through, for the
    /// current stage progress.
    fn packet_state(&self) -> (f32, f32) {
        let t = self.machine.progress();
        let p = transmission_probability(self.height, self.width);
        let edge = -self.width * 0.5;
        match self.machine.current() {
            TunnelStage::Approaching => (START_X + (edge - START_X) * t, 0.0),
            TunnelStage::Tunneling => (edge, p.max(0.05) * t),
            TunnelStage::Transmitted => {
                if self.transmitted {
                    (self.width * 0.5 + (END_X - self.width * 0.5) * t, 1.0)
                } else {
                    (edge + (START_X - edge) * t, 0.0)
                }
            }
            TunnelStage::Resetting => (START_X, 0.0),
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let (center, leak) = self.packet_state();
        let resetting = self.machine.current() == TunnelStage::Resetting;
        let fade = if resetting { self.machine.progress() } else { 1.0 };
        let wave = rgba(COLOR_WAVE, 0.85);
        if let Some(sprites) = ctx.scene.sprites_mut(parts.packet) {
            for (s, off) in sprites.iter_mut().zip(&self.offsets) {
                let carrier = 0.5 + 0.5 * (off.x * 9.0 - self.clock * 8.0).cos();
                let envelope = (-off.x * off.x * 3.0).exp();
                let mut p = Vec3::new(center + off.x, off.y * envelope, off.z * envelope);
                // A leaking packet shows a thin copy beyond the barrier.
                if leak > 0.0 && off.x > 0.0 && self.machine.current() == TunnelStage::Tunneling {
                    p.x = self.width * 0.5 + off.x;
                }
                s.position = p;
                s.size = 0.06 + 0.05 * carrier;
                let mut c = wave;
                let beyond = p.x > self.width * 0.5;
                c.w = envelope * fade * if beyond && leak < 1.0 { leak.max(0.15) } else { 1.0 };
                s.color = c;
            }
        }
        if let Some(node) = ctx.scene.node_mut(parts.barrier) {
            let h = self.height;
            let w = self.width;
            let color = rgba(COLOR_BARRIER, 0.2 + 0.15 * h.min(3.0));
            for (i, s) in node.sprites_mut().iter_mut().enumerate() {
                let row = i / BARRIER_COLS;
                let col = i % BARRIER_COLS;
                let x = -w * 0.5 + w * (col as f32 + 0.5) / BARRIER_COLS as f32;
                let y = -1.2 + 2.4 * (row as f32 + 0.5) / BARRIER_ROWS as f32;
                s.position = Vec3::new(x, y * (0.5 + 0.5 * h.min(2.0)), 0.0);
                s.size = 0.18;
                s.color = color;
            }
        }
    }
}

impl Default for Tunneling {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Tunneling {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        self.rng = seeded(TAG);
        self.offsets = (0..PACKET_SPRITES)
            .map(|_| {
                Vec3::new(
                    gaussian(&mut self.rng) * 0.45,
                    gaussian(&mut self.rng) * 0.3,
                    gaussian(&mut self.rng) * 0.3,
                )
            })
            .collect();
        let packet = self.nodes.add(ctx.scene, TAG, "packet", PACKET_SPRITES);
        let barrier = self.nodes.add(ctx.scene, TAG, "barrier", BARRIER_ROWS * BARRIER_COLS);
        self.parts = Some(Parts { packet, barrier });
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
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("height", "Barrier height", 0.2, 3.0, 0.1, self.height),
            ControlDescriptor::slider("width", "Barrier width", 0.1, 1.0, 0.05, self.width),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("height", ControlValue::Number(v)) => self.height = v,
            ("width", ControlValue::Number(v)) => self.width = v,
            _ => {}
        }
        Ok(())
    }

    fn reset(&mut self, ctx: &mut SceneContext<'_>) {
        self.restart();
        self.write(ctx);
    }

    fn dispose(&mut self, ctx: &mut SceneContext<'_>) {
        self.nodes.release_all(ctx.scene);
        self.parts = None;
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match self.machine.current() {
            TunnelStage::Approaching => "approaching barrier",
            TunnelStage::Tunneling => "at barrier",
            TunnelStage::Transmitted if self.transmitted => "transmitted",
            TunnelStage::Transmitted => "reflected",
            TunnelStage::Resetting => "resetting",
        })
    }
}

impl Tunneling {
    fn restart(&mut self) {
        self.machine.reset();
        self.rng = seeded(TAG);
        self.transmitted = false;
        self.attempts = 0;
        self.successes = 0;
        self.clock = 0.0;
    }
}
