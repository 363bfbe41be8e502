// Host-side tests for the rebuildable listener registry.

#![allow(dead_code)]
#[path = "../src/listeners.rs"]
mod listeners;

use listeners::Listeners;
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for a JS closure: counts how many are still alive.
struct Callback(Rc<Cell<usize>>);

impl Callback {
    fn new(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self(live.clone())
    }
}

impl Drop for Callback {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

fn build_panel(owned: &mut Listeners<&'static str, Callback>, live: &Rc<Cell<usize>>, widgets: &[&'static str]) {
    for w in widgets {
        owned.push(w, "input", Callback::new(live));
    }
}

#[test]
fn rebuilding_the_panel_frees_old_callbacks() {
    let live = Rc::new(Cell::new(0));
    let mut owned = Listeners::default();
    let verses: [&[&'static str]; 4] = [&["theta", "spread", "measure"], &["lean"], &["rate", "reset"], &["theta"]];
    for widgets in verses {
        let mut detached = Vec::new();
        owned.release_all(|target, event, _| detached.push((*target, event.to_string())));
        assert!(detached.iter().all(|(_, e)| e == "input"));
        build_panel(&mut owned, &live, widgets);
        assert_eq!(live.get(), widgets.len(), "callbacks from earlier verses are still alive");
        assert_eq!(owned.len(), widgets.len());
    }
    assert_eq!(owned.released(), 3 + 1 + 2);
}

#[test]
fn release_detaches_every_registration_once() {
    let live = Rc::new(Cell::new(0));
    let mut owned = Listeners::default();
    build_panel(&mut owned, &live, &["a", "b"]);
    let mut calls = Vec::new();
    assert_eq!(owned.release_all(|t, _, _| calls.push(*t)), 2);
    assert_eq!(calls, vec!["a", "b"]);
    assert_eq!(live.get(), 0);
    assert_eq!(owned.release_all(|_, _, _| panic!("nothing left to detach")), 0);
    assert_eq!(owned.len(), 0);
}
