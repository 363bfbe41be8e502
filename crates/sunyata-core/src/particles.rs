//! Fixed-capacity particle pool.
//!
//! Slots are allocated once; spawning reuses dead slots and fails when
//! the pool is full, so per-frame work never grows the storage.

use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    /// Seconds until the particle dies; `f32::INFINITY` for immortal ones.
    pub lifetime: f32,
    /// Free per-effect value (charge, phase, which slit, ...).
    pub tag: f32,
    pub alive: bool,
}

impl Particle {
    /// Age as a fraction of lifetime, in `[0, 1]`.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.lifetime.is_finite() && self.lifetime > 0.0 {
            (self.age / self.lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    alive: usize,
    cursor: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            alive: 0,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn is_full(&self) -> bool {
        self.alive == self.slots.len()
    }

    /// Place a particle in the next free slot and return its index.
    pub fn spawn(&mut self, position: Vec3, velocity: Vec3, lifetime: f32, tag: f32) -> Option<usize> {
        let n = self.slots.len();
        for step in 0..n {
            let i = (self.cursor + step) % n;
            if !self.slots[i].alive {
                self.slots[i] = Particle {
                    position,
                    velocity,
                    age: 0.0,
                    lifetime,
                    tag,
                    alive: true,
                };
                self.alive += 1;
                self.cursor = (i + 1) % n;
                return Some(i);
            }
        }
        None
    }

    pub fn kill(&mut self, index: usize) {
        if let Some(p) = self.slots.get_mut(index) {
            if p.alive {
                p.alive = false;
                self.alive -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        for p in &mut self.slots {
            p.alive = false;
        }
        self.alive = 0;
        self.cursor = 0;
    }

    /// Integrate every live particle, apply `accel`, and retire those
    /// whose age passes their lifetime. Returns how many died.
    pub fn step(&mut self, dt: f32, mut accel: impl FnMut(&Particle) -> Vec3) -> usize {
        let mut died = 0;
        for p in self.slots.iter_mut().filter(|p| p.alive) {
            let a = accel(p);
            p.velocity += a * dt;
            p.position += p.velocity * dt;
            p.age += dt;
            if p.age >= p.lifetime {
                p.alive = false;
                died += 1;
            }
        }
        self.alive -= died;
        died
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index).filter(|p| p.alive)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots.get_mut(index).filter(|p| p.alive)
    }

    /// Every slot, dead or alive, in index order.
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.alive)
    }

    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = (usize, &mut Particle)> {
        self.slots.iter_mut().enumerate().filter(|(_, p)| p.alive)
    }
}
