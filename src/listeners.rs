//! Event listeners owned by widgets that get torn down and rebuilt.
//! Each registration is detached and its callback dropped on release, so
//! rebuilding the controls panel does not leave old closures behind.

pub struct Registration<T, C> {
    pub target: T,
    pub event: &'static str,
    pub callback: C,
}

/// Registrations for one group of widgets. `T` is the event target and
/// `C` the callback handle.
pub struct Listeners<T, C> {
    entries: Vec<Registration<T, C>>,
    released: u64,
}

impl<T, C> Default for Listeners<T, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            released: 0,
        }
    }
}

impl<T, C> Listeners<T, C> {
    pub fn push(&mut self, target: T, event: &'static str, callback: C) {
        self.entries.push(Registration {
            target,
            event,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total registrations released over the lifetime of this group.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Hands every registration to `detach`, then drops its callback.
    /// Returns how many were released.
    pub fn release_all(&mut self, mut detach: impl FnMut(&T, &str, &C)) -> usize {
        let n = self.entries.len();
        for reg in self.entries.drain(..) {
            detach(&reg.target, reg.event, &reg.callback);
        }
        self.released += n as u64;
        n
    }
}
