//! Timed phase state machine shared by the animations.
//!
//! A machine sits in one phase for `dwell` seconds, then moves to
//! `next`. Callers run the entry action for whatever phase
//! [`PhaseMachine::advance`] returns.

use std::fmt::Debug;

/// A finite set of named phases with a successor and a dwell time.
pub trait Phase: Copy + Eq + Debug {
    fn next(self) -> Self;
    /// Seconds spent in this phase before advancing.
    fn dwell(self) -> f32;
}

/// What happens to the time accumulated past a phase's dwell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Residual {
    /// The timer restarts at zero on every transition.
    #[default]
    Discard,
    /// The overshoot is kept and counts toward the next phase.
    Carry,
}

#[derive(Clone, Debug)]
pub struct PhaseMachine<P: Phase> {
    initial: P,
    current: P,
    timer: f32,
    residual: Residual,
    transitions: u64,
}

impl<P: Phase> PhaseMachine<P> {
    pub fn new(initial: P) -> Self {
        Self {
            initial,
            current: initial,
            timer: 0.0,
            residual: Residual::Discard,
            transitions: 0,
        }
    }

    pub fn with_residual(mut self, residual: Residual) -> Self {
        self.residual = residual;
        self
    }

    pub fn current(&self) -> P {
        self.current
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Fraction of the current dwell already spent, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let d = self.current.dwell();
        if d <= 0.0 {
            1.0
        } else {
            (self.timer / d).clamp(0.0, 1.0)
        }
    }

    /// Accumulate `dt` and return the newly entered phase, if any.
    ///
    /// At most one transition happens per call, even when `dt` spans
    /// several dwell times.
    pub fn advance(&mut self, dt: f32) -> Option<P> {
        self.timer += dt.max(0.0);
        let dwell = self.current.dwell();
        if self.timer > dwell {
            self.timer = match self.residual {
                Residual::Discard => 0.0,
                Residual::Carry => (self.timer - dwell).min(self.current.next().dwell()),
            };
            self.current = self.current.next();
            self.transitions += 1;
            Some(self.current)
        } else {
            None
        }
    }

    /// Jump straight to `phase` with a fresh timer.
    pub fn force(&mut self, phase: P) {
        if phase != self.current {
            self.transitions += 1;
        }
        self.current = phase;
        self.timer = 0.0;
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
        self.timer = 0.0;
        self.transitions = 0;
    }
}
