//! Retained scene shared by whichever animation is active.
//!
//! Nodes are batches of camera-facing sprites with a fixed capacity set
//! when the node is added. The renderer flattens visible nodes into one
//! instance buffer every frame. The scene keeps counts of live nodes
//! and sprite storage so a leaking `dispose` shows up in tests.

use crate::camera::OrbitCamera;
use glam::{Quat, Vec3, Vec4};

/// Generational handle to a scene node. Stale handles never alias a
/// newer node that reused the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sprite {
    pub position: Vec3,
    pub size: f32,
    /// Linear RGB plus alpha.
    pub color: Vec4,
}

impl Sprite {
    pub fn new(position: Vec3, size: f32, color: Vec4) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transform {
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.translation + self.rotation * (p * self.scale)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub owner: &'static str,
    pub label: &'static str,
    pub transform: Transform,
    pub visible: bool,
    pub opacity: f32,
    pub pickable: bool,
    sprites: Vec<Sprite>,
    active: usize,
}

impl Node {
    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    /// Sprites that will be drawn this frame.
    pub fn active_sprites(&self) -> &[Sprite] {
        &self.sprites[..self.active]
    }

    /// Full backing storage. Writing here never allocates.
    pub fn sprites_mut(&mut self) -> &mut [Sprite] {
        &mut self.sprites
    }

    /// Draw only the first `n` sprites (clamped to capacity).
    pub fn set_active(&mut self, n: usize) {
        self.active = n.min(self.sprites.len());
    }

    pub fn active(&self) -> usize {
        self.active
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A ray hit against a pickable sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub label: &'static str,
    pub sprite: usize,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    sprite_storage: usize,
    allocations: u64,
    releases: u64,
    pub background: Vec3,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: Vec3::new(0.01, 0.012, 0.03),
            ..Default::default()
        }
    }

    /// Allocate a node holding `capacity` sprites, all drawn by default.
    pub fn add_node(&mut self, owner: &'static str, label: &'static str, capacity: usize) -> NodeId {
        let node = Node {
            owner,
            label,
            transform: Transform::default(),
            visible: true,
            opacity: 1.0,
            pickable: false,
            sprites: vec![Sprite::default(); capacity],
            active: capacity,
        };
        self.live += 1;
        self.sprite_storage += capacity;
        self.allocations += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    /// Release a node. Returns `false` for stale or already-removed ids.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            return false;
        }
        let Some(node) = slot.node.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        self.sprite_storage -= node.capacity();
        self.releases += 1;
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn sprites_mut(&mut self, id: NodeId) -> Option<&mut [Sprite]> {
        self.node_mut(id).map(Node::sprites_mut)
    }

    pub fn live_nodes(&self) -> usize {
        self.live
    }

    pub fn sprite_storage(&self) -> usize {
        self.sprite_storage
    }

    /// Total nodes ever added.
    pub fn allocation_count(&self) -> u64 {
        self.allocations
    }

    pub fn release_count(&self) -> u64 {
        self.releases
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.node.as_ref().map(|n| {
                (
                    NodeId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    n,
                )
            })
        })
    }

    pub fn nodes_owned_by<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes().filter(move |(_, n)| n.owner == owner).map(|(id, _)| id)
    }

    /// Every drawn sprite in world space with node opacity folded into alpha.
    pub fn for_each_world_sprite(&self, mut f: impl FnMut(Sprite)) {
        for (_, node) in self.nodes().filter(|(_, n)| n.visible && n.opacity > 0.0) {
            let t = node.transform;
            for s in node.active_sprites() {
                if s.color.w <= 0.0 || s.size <= 0.0 {
                    continue;
                }
                f(Sprite {
                    position: t.apply(s.position),
                    size: s.size * t.scale,
                    color: Vec4::new(s.color.x, s.color.y, s.color.z, s.color.w * node.opacity),
                });
            }
        }
    }

    pub fn visible_sprite_count(&self) -> usize {
        let mut n = 0;
        self.for_each_world_sprite(|_| n += 1);
        n
    }

    /// Closest pickable sprite along a ray. Sprites are treated as spheres
    /// of radius `size * 0.5 * pick_scale`.
    pub fn pick(&self, origin: Vec3, dir: Vec3, pick_scale: f32) -> Option<PickHit> {
        let mut best: Option<PickHit> = None;
        for (id, node) in self.nodes().filter(|(_, n)| n.visible && n.pickable) {
            let t = node.transform;
            for (i, s) in node.active_sprites().iter().enumerate() {
                let center = t.apply(s.position);
                let radius = s.size * t.scale * 0.5 * pick_scale;
                if let Some(d) = ray_sphere(origin, dir, center, radius) {
                    if best.map_or(true, |b| d < b.distance) {
                        best = Some(PickHit {
                            node: id,
                            label: node.label,
                            sprite: i,
                            distance: d,
                            point: origin + dir * d,
                        });
                    }
                }
            }
        }
        best
    }
}

/// Distance along a normalized ray to the first sphere hit in front of
/// the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// The mutable shared context an animation sees during a lifecycle call.
pub struct SceneContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut OrbitCamera,
}

impl<'a> SceneContext<'a> {
    pub fn new(scene: &'a mut Scene, camera: &'a mut OrbitCamera) -> Self {
        Self { scene, camera }
    }
}
