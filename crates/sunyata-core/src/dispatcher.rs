//! Owns the single active animation and swaps it on navigation.

use crate::animation::Animation;
use crate::controls::{ControlDescriptor, ControlValue};
use crate::error::{ControlError, DispatchError};
use crate::registry::{AnimationRegistry, FallbackPolicy, Resolution};
use crate::scene::{PickHit, SceneContext};

pub struct Dispatcher {
    registry: AnimationRegistry,
    policy: FallbackPolicy,
    active: Option<Box<dyn Animation>>,
    activations: u64,
}

impl Dispatcher {
    pub fn new(registry: AnimationRegistry, policy: FallbackPolicy) -> Self {
        Self {
            registry,
            policy,
            active: None,
            activations: 0,
        }
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FallbackPolicy) {
        self.policy = policy;
    }

    /// Replace the active animation with a fresh instance for `tag`.
    ///
    /// The tag is resolved before anything is torn down, so a rejected tag
    /// under [`FallbackPolicy::Strict`] leaves the current animation
    /// running. Otherwise the old instance is disposed before the new one
    /// is constructed and initialized.
    pub fn activate(&mut self, tag: &str, ctx: &mut SceneContext<'_>) -> Result<Resolution, DispatchError> {
        let resolution = self.registry.resolve(tag, self.policy)?;
        if let Some(requested) = &resolution.substituted_for {
            log::warn!(
                "[dispatch] unknown animation `{}`; substituting default `{}`",
                requested,
                resolution.tag
            );
        }

        let previous = self.deactivate(ctx);

        let (mut next, _) = self.registry.create(resolution.tag, FallbackPolicy::Strict)?;
        next.init(ctx);
        self.activations += 1;
        log::info!(
            "[dispatch] {} -> {}",
            previous.unwrap_or("(none)"),
            resolution.tag
        );
        self.active = Some(next);
        Ok(resolution)
    }

    /// Dispose the active animation, if any, and return its tag.
    pub fn deactivate(&mut self, ctx: &mut SceneContext<'_>) -> Option<&'static str> {
        let mut old = self.active.take()?;
        old.dispose(ctx);
        Some(old.tag())
    }

    pub fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) {
        if let Some(a) = self.active.as_mut() {
            a.update(dt, ctx);
        }
    }

    pub fn reset(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(a) = self.active.as_mut() {
            a.reset(ctx);
        }
    }

    pub fn pick(&mut self, hit: &PickHit, ctx: &mut SceneContext<'_>) -> bool {
        self.active.as_mut().is_some_and(|a| a.on_pick(hit, ctx))
    }

    pub fn controls(&self) -> Vec<ControlDescriptor> {
        self.active.as_ref().map(|a| a.controls()).unwrap_or_default()
    }

    pub fn set_control(&mut self, key: &str, value: ControlValue) -> Result<(), ControlError> {
        self.active
            .as_mut()
            .ok_or(ControlError::NoActiveAnimation)?
            .set_control(key, value)
    }

    pub fn active_tag(&self) -> Option<&'static str> {
        self.active.as_ref().map(|a| a.tag())
    }

    pub fn phase_label(&self) -> Option<&'static str> {
        self.active.as_ref().and_then(|a| a.phase_label())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of successful activations since construction.
    pub fn activations(&self) -> u64 {
        self.activations
    }
}
