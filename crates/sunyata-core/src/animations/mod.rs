//! Built-in visual metaphors.
//!
//! Each module is independent; they share only the phase machine,
//! particle pool, tween set and the small helpers below.

mod decoherence;
mod double_slit;
mod entanglement;
mod interference;
mod superposition;
mod tunneling;
mod uncertainty;
mod vacuum;

pub use decoherence::{Decoherence, DecoherenceStage};
pub use double_slit::{fringe_intensity, DoubleSlit, EmitterStage};
pub use entanglement::{Entanglement, PairStage};
pub use interference::{Interference, RippleStage};
pub use superposition::{Superposition, SuperpositionStage};
pub use tunneling::{transmission_probability, Tunneling, TunnelStage};
pub use uncertainty::{momentum_spread, SqueezeStage, Uncertainty, HBAR};
pub use vacuum::{FieldStage, VacuumFluctuation};

use crate::animation::Animation;
use crate::registry::AnimationRegistry;
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const DEFAULT_ANIMATION: &str = superposition::TAG;

/// Registry with every built-in animation; `superposition` is the fallback.
pub fn builtin_registry() -> AnimationRegistry {
    AnimationRegistry::new(DEFAULT_ANIMATION)
        .with(superposition::TAG, || Box::new(Superposition::new()) as Box<dyn Animation>)
        .with(entanglement::TAG, || Box::new(Entanglement::new()) as Box<dyn Animation>)
        .with(decoherence::TAG, || Box::new(Decoherence::new()) as Box<dyn Animation>)
        .with(tunneling::TAG, || Box::new(Tunneling::new()) as Box<dyn Animation>)
        .with(double_slit::TAG, || Box::new(DoubleSlit::new()) as Box<dyn Animation>)
        .with(vacuum::TAG, || Box::new(VacuumFluctuation::new()) as Box<dyn Animation>)
        .with(uncertainty::TAG, || Box::new(Uncertainty::new()) as Box<dyn Animation>)
        .with(interference::TAG, || Box::new(Interference::new()) as Box<dyn Animation>)
}

/// Deterministic per-animation RNG so runs are reproducible.
fn seeded(tag: &str) -> StdRng {
    let seed = tag
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3));
    StdRng::seed_from_u64(seed)
}

/// Evenly spread point `i` of `n` on the unit sphere.
fn fibonacci_sphere(i: usize, n: usize) -> Vec3 {
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let y = 1.0 - 2.0 * (i as f32 + 0.5) / n.max(1) as f32;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden * i as f32;
    Vec3::new(theta.cos() * r, y, theta.sin() * r)
}

#[inline]
fn mix(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Standard normal sample via Box-Muller.
fn gaussian(rng: &mut StdRng) -> f32 {
    use rand::Rng;
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}
