use super::mix;
use crate::animation::{Animation, NodeSet};
use crate::constants::{rgba, COLOR_PARTICLE, COLOR_WAVE};
use crate::controls::{self, ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::phase::{Phase, PhaseMachine};
use crate::scene::{NodeId, PickHit, SceneContext};
use crate::tween::{Easing, TweenSet};
use glam::{Vec3, Vec4};
use std::f32::consts::TAU;

pub(super) const TAG: &str = "interference";

const GRID: usize = 64;
const SPAN: f32 = 9.0;
const WAVE_SPEED: f32 = 1.2;
const AMPLITUDE: f32 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleStage {
    Rippling,
    Shifting,
}

impl Phase for RippleStage {
    fn next(self) -> Self {
        match self {
            Self::Rippling => Self::Shifting,
            Self::Shifting => Self::Rippling,
        }
    }

    fn dwell(self) -> f32 {
        match self {
            Self::Rippling => 6.0,
            Self::Shifting => 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Drift,
}

struct Parts {
    surface: NodeId,
    sources: NodeId,
}

/// Ripples from two sources add and cancel across a surface. Clicking a
/// source silences it.
pub struct Interference {
    nodes: NodeSet,
    parts: Option<Parts>,
    machine: PhaseMachine<RippleStage>,
    tweens: TweenSet<Prop>,
    wavelength: f32,
    separation: f32,
    phase_deg: f32,
    /// Extra phase swept in during `Shifting`, in radians.
    drift: f32,
    enabled: [bool; 2],
    clock: f32,
}

impl Interference {
    pub fn new() -> Self {
        Self {
            nodes: NodeSet::new(),
            parts: None,
            machine: PhaseMachine::new(RippleStage::Rippling),
            tweens: TweenSet::new(),
            wavelength: 1.0,
            separation: 2.0,
            phase_deg: 0.0,
            drift: 0.0,
            enabled: [true, true],
            clock: 0.0,
        }
    }

    pub fn stage(&self) -> RippleStage {
        self.machine.current()
    }

    pub fn sources_enabled(&self) -> [bool; 2] {
        self.enabled
    }

    fn source_positions(&self) -> [Vec3; 2] {
        let h = self.separation * 0.5;
        [Vec3::new(-h, 0.0, -SPAN * 0.35), Vec3::new(h, 0.0, -SPAN * 0.35)]
    }

    /// Surface displacement at `(x, z)`.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let k = TAU / self.wavelength;
        let omega = k * WAVE_SPEED;
        let offsets = [0.0, self.phase_deg.to_radians() + self.drift];
        let mut sum = 0.0;
        for ((src, on), offset) in self.source_positions().iter().zip(self.enabled).zip(offsets) {
            if !on {
                continue;
            }
            let r = Vec3::new(x - src.x, 0.0, z - src.z).length();
            // Amplitude falls off slowly so far ripples stay visible.
            let falloff = 1.0 / (1.0 + 0.25 * r);
            sum += (k * r - omega * self.clock + offset).sin() * falloff;
        }
        sum * AMPLITUDE
    }

    fn enter(&mut self, stage: RippleStage) {
        if stage == RippleStage::Shifting {
            let from = self.drift % TAU;
            self.tweens
                .start(Prop::Drift, from, from + TAU * 0.5, stage.dwell(), Easing::SineInOut);
        }
    }

    fn write(&self, ctx: &mut SceneContext<'_>) {
        let Some(parts) = &self.parts else {
            return;
        };
        let trough = rgba(COLOR_WAVE, 0.25);
        let crest = Vec4::new(0.85, 0.95, 1.0, 0.9);
        if let Some(sprites) = ctx.scene.sprites_mut(parts.surface) {
            for (i, s) in sprites.iter_mut().enumerate() {
                let x = ((i % GRID) as f32 / (GRID - 1) as f32 - 0.5) * SPAN;
                let z = ((i / GRID) as f32 / (GRID - 1) as f32 - 0.5) * SPAN;
                let h = self.height_at(x, z);
                s.position = Vec3::new(x, h, z);
                s.size = 0.1;
                s.color = mix(trough, crest, h / (2.0 * AMPLITUDE) + 0.5);
            }
        }
        if let Some(sprites) = ctx.scene.sprites_mut(parts.sources) {
            let positions = self.source_positions();
            for (i, s) in sprites.iter_mut().enumerate() {
                s.position = positions[i] + Vec3::Y * 0.3;
                s.size = 0.35;
                s.color = rgba(COLOR_PARTICLE, if self.enabled[i] { 1.0 } else { 0.25 });
            }
        }
    }
}

impl Default for Interference {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Interference {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) {
        self.dispose(ctx);
        let surface = self.nodes.add(ctx.scene, TAG, "surface", GRID * GRID);
        let sources = self.nodes.add(ctx.scene, TAG, "sources", 2);
        if let Some(node) = ctx.scene.node_mut(sources) {
            node.pickable = true;
        }
        self.parts = Some(Parts { surface, sources });
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
        let mut drift = self.drift;
        self.tweens.tick(dt, |prop, v| match prop {
            Prop::Drift => drift = v,
        });
        self.drift = drift;
        self.write(ctx);
    }

    fn controls(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::slider("wavelength", "Wavelength", 0.4, 2.0, 0.05, self.wavelength),
            ControlDescriptor::slider("separation", "Source separation", 0.5, 4.0, 0.1, self.separation),
            ControlDescriptor::slider("phase", "Phase offset (deg)", 0.0, 360.0, 5.0, self.phase_deg),
        ]
    }

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        let value = controls::resolve(TAG, &self.controls(), key, value)?;
        match (key, value) {
            ("wavelength", ControlValue::Number(v)) => self.wavelength = v,
            ("separation", ControlValue::Number(v)) => self.separation = v,
            ("phase", ControlValue::Number(v)) => self.phase_deg = v,
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
        let ours = self.parts.as_ref().is_some_and(|p| p.sources == hit.node);
        match self.enabled.get_mut(hit.sprite) {
            Some(on) if ours => {
                *on = !*on;
                log::debug!("[interference] source {} enabled={}", hit.sprite, on);
                true
            }
            _ => false,
        }
    }

    fn phase_label(&self) -> Option<&'static str> {
        Some(match (self.enabled, self.machine.current()) {
            ([true, true], RippleStage::Rippling) => "two sources",
            ([true, true], RippleStage::Shifting) => "shifting phase",
            ([false, false], _) => "silent",
            _ => "one source",
        })
    }
}

impl Interference {
    fn restart(&mut self) {
        self.tweens.cancel_all();
        self.machine.reset();
        self.drift = 0.0;
        self.enabled = [true, true];
        self.clock = 0.0;
    }
}
