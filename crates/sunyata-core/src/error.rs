//! Error types for the core crate.
//!
//! The content table is compiled in, so most of these indicate a
//! configuration mistake rather than a runtime condition.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("no verse with id {0} in this chapter")]
    UnknownVerse(u32),
    #[error("no chapter numbered {0}")]
    UnknownChapter(u32),
    #[error("chapter {0} has no verses")]
    EmptyChapter(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("animation `{animation}` has no control `{key}`")]
    UnknownControl { animation: &'static str, key: String },
    #[error("control `{key}` expects a {expected} value")]
    WrongKind { key: String, expected: &'static str },
    #[error("control `{key}` has no option {index}")]
    NoSuchOption { key: String, index: usize },
    #[error("no animation is active")]
    NoActiveAnimation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("animation tag `{0}` is not registered")]
    UnknownTag(String),
    #[error("default animation `{0}` is not registered")]
    MissingDefault(&'static str),
}

/// Umbrella error for callers that drive the whole [`crate::App`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SunyataError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
