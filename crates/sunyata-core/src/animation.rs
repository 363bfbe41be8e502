//! The lifecycle every visual metaphor implements.

use crate::controls::{ControlDescriptor, ControlValue};
use crate::error::ControlError;
use crate::scene::{NodeId, PickHit, Scene, SceneContext};
use smallvec::SmallVec;

/// A self-contained animation driven by the shared frame loop.
///
/// At most one instance is active at a time; the dispatcher calls
/// `dispose` on the previous instance before `init` on the next.
pub trait Animation {
    /// Registry tag this instance was built for.
    fn tag(&self) -> &'static str;

    /// Allocate scene nodes and reset the simulation. Must work again
    /// after `dispose`.
    fn init(&mut self, ctx: &mut SceneContext<'_>);

    /// Advance by `dt` seconds and write the new state into the nodes
    /// allocated by `init`. Never allocates scene storage.
    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>);

    fn controls(&self) -> Vec<ControlDescriptor>;

    fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError>;

    /// Restart the simulation in place, keeping allocated nodes.
    fn reset(&mut self, ctx: &mut SceneContext<'_>);

    /// Release every node and cancel pending tweens. A no-op on an
    /// instance that was never initialized or is already disposed.
    fn dispose(&mut self, ctx: &mut SceneContext<'_>);

    /// React to a click that hit one of this instance's pickable nodes.
    /// Returns whether the hit was consumed.
    fn on_pick(&mut self, _hit: &PickHit, _ctx: &mut SceneContext<'_>) -> bool {
        false
    }

    /// Short name of the current simulation phase, for the HUD.
    fn phase_label(&self) -> Option<&'static str> {
        None
    }
}

/// Constructor stored in the registry.
pub type AnimationFactory = fn() -> Box<dyn Animation>;

/// The scene nodes one instance owns.
#[derive(Debug, Default)]
pub struct NodeSet {
    ids: SmallVec<[NodeId; 8]>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, scene: &mut Scene, owner: &'static str, label: &'static str, capacity: usize) -> NodeId {
        let id = scene.add_node(owner, label, capacity);
        self.ids.push(id);
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove every owned node from `scene`; returns how many were live.
    pub fn release_all(&mut self, scene: &mut Scene) -> usize {
        self.ids.drain(..).filter(|id| scene.remove(*id)).count()
    }
}
