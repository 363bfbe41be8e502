//! Verse content, animation lifecycle and frame dispatch shared by the
//! web and native front-ends.

pub mod animation;
pub mod animations;
pub mod app;
pub mod camera;
pub mod constants;
pub mod content;
pub mod controls;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod input;
pub mod particles;
pub mod phase;
pub mod registry;
pub mod scene;
pub mod tween;
mod verses;

pub use animation::{Animation, AnimationFactory, NodeSet};
pub use animations::{builtin_registry, DEFAULT_ANIMATION};
pub use app::{App, AppConfig};
pub use camera::{Camera, OrbitCamera};
pub use content::{Chapter, ContentEntry, ContentRegistry, Library};
pub use controls::{ControlDescriptor, ControlKind, ControlValue};
pub use dispatcher::Dispatcher;
pub use driver::{FrameClock, FrameSink};
pub use error::{ContentError, ControlError, DispatchError, SunyataError};
pub use input::{command_for_key, Command};
pub use particles::{Particle, ParticlePool};
pub use phase::{Phase, PhaseMachine, Residual};
pub use registry::{AnimationRegistry, FallbackPolicy, Resolution};
pub use scene::{NodeId, PickHit, Scene, SceneContext, Sprite};
pub use tween::{Easing, TweenSet};
