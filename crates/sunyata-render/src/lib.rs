//! GPU side of sunyata: draws the core [`Scene`](sunyata_core::Scene) as
//! camera-facing sprites into an HDR target, then blooms and tone maps it
//! onto the surface. Used unchanged by the web and native front-ends.

mod helpers;
mod instances;
mod post;
mod renderer;
mod targets;

pub use instances::{pack_sprites, SceneUniforms, SpriteInstance, QUAD_CORNERS};
pub use renderer::{RenderError, SpriteRenderer};

pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
