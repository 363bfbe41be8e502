//! Property tweens owned by a single animation instance.
//!
//! Tweens live inside the instance that started them and only advance
//! when that instance is updated. Dropping or cancelling the set stops
//! them, so nothing can write into a disposed animation.

use smallvec::SmallVec;

/// Easing curves for tweened values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    #[default]
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Evaluate at `t`, clamped to `[0, 1]`.
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = -2.0 * t + 2.0;
                    1.0 - f * f * f / 2.0
                }
            }
            Easing::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween<K> {
    key: K,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl<K> Tween<K> {
    fn value(&self) -> f32 {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from + (self.to - self.from) * self.easing.evaluate(t)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone)]
pub struct TweenSet<K: Copy + Eq> {
    tweens: SmallVec<[Tween<K>; 8]>,
}

impl<K: Copy + Eq> Default for TweenSet<K> {
    fn default() -> Self {
        Self {
            tweens: SmallVec::new(),
        }
    }
}

impl<K: Copy + Eq> TweenSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tweening `key`, replacing any tween already running on it.
    pub fn start(&mut self, key: K, from: f32, to: f32, duration: f32, easing: Easing) {
        self.tweens.retain(|t| t.key != key);
        self.tweens.push(Tween {
            key,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        });
    }

    /// Advance all tweens and report each current value to `apply`.
    ///
    /// A finished tween reports its end value once and is then dropped.
    pub fn tick(&mut self, dt: f32, mut apply: impl FnMut(K, f32)) {
        for t in self.tweens.iter_mut() {
            t.elapsed = (t.elapsed + dt.max(0.0)).min(t.duration);
            apply(t.key, t.value());
        }
        self.tweens.retain(|t| !t.finished());
    }

    pub fn is_active(&self, key: K) -> bool {
        self.tweens.iter().any(|t| t.key == key)
    }

    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.key != key);
        before != self.tweens.len()
    }

    /// Drop every pending tween and return how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tweens.len();
        self.tweens.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
