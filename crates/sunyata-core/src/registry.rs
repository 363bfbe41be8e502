//! Tag → constructor table for animations.

use crate::animation::{Animation, AnimationFactory};
use crate::error::DispatchError;
use fnv::FnvHashMap;

/// What to do when content names an animation tag nobody registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Substitute the registry default and log a warning.
    #[default]
    UseDefault,
    /// Refuse with [`DispatchError::UnknownTag`].
    Strict,
}

/// Outcome of resolving a requested tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub tag: &'static str,
    /// The requested tag when the default was substituted for it.
    pub substituted_for: Option<String>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.substituted_for.is_some()
    }
}

#[derive(Clone)]
pub struct AnimationRegistry {
    factories: FnvHashMap<&'static str, AnimationFactory>,
    order: Vec<&'static str>,
    default_tag: &'static str,
}

impl std::fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("tags", &self.order)
            .field("default_tag", &self.default_tag)
            .finish()
    }
}

impl AnimationRegistry {
    /// An empty registry whose fallback will be `default_tag` once that
    /// tag is registered.
    pub fn new(default_tag: &'static str) -> Self {
        Self {
            factories: FnvHashMap::default(),
            order: Vec::new(),
            default_tag,
        }
    }

    pub fn register(&mut self, tag: &'static str, factory: AnimationFactory) -> &mut Self {
        if self.factories.insert(tag, factory).is_some() {
            log::debug!("[registry] replaced factory for `{}`", tag);
        } else {
            self.order.push(tag);
        }
        self
    }

    pub fn with(mut self, tag: &'static str, factory: AnimationFactory) -> Self {
        self.register(tag, factory);
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn default_tag(&self) -> &'static str {
        self.default_tag
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> &[&'static str] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn resolve(&self, tag: &str, policy: FallbackPolicy) -> Result<Resolution, DispatchError> {
        if let Some((&known, _)) = self.factories.get_key_value(tag) {
            return Ok(Resolution {
                tag: known,
                substituted_for: None,
            });
        }
        match policy {
            FallbackPolicy::Strict => Err(DispatchError::UnknownTag(tag.to_string())),
            FallbackPolicy::UseDefault => {
                if !self.factories.contains_key(self.default_tag) {
                    return Err(DispatchError::MissingDefault(self.default_tag));
                }
                Ok(Resolution {
                    tag: self.default_tag,
                    substituted_for: Some(tag.to_string()),
                })
            }
        }
    }

    /// Build a fresh, uninitialized instance for `tag`.
    pub fn create(
        &self,
        tag: &str,
        policy: FallbackPolicy,
    ) -> Result<(Box<dyn Animation>, Resolution), DispatchError> {
        let resolution = self.resolve(tag, policy)?;
        let factory = self
            .factories
            .get(resolution.tag)
            .ok_or(DispatchError::MissingDefault(self.default_tag))?;
        Ok((factory(), resolution))
    }
}
