//! Interactive parameter descriptors.
//!
//! An animation lists its tweakable parameters as plain data; the shell
//! renders them however it likes and sends changes back through
//! [`crate::Animation::set_control`].

use crate::error::ControlError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f32, max: f32, step: f32 },
    Toggle,
    Choice { options: &'static [&'static str] },
    /// A one-shot action such as "measure".
    Button,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Bool(bool),
    Choice(usize),
    Trigger,
}

impl ControlValue {
    pub fn as_f32(self) -> Option<f32> {
        match self {
            ControlValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            ControlValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_choice(self) -> Option<usize> {
        match self {
            ControlValue::Choice(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    pub value: ControlValue,
}

impl ControlDescriptor {
    pub fn slider(key: &'static str, label: &'static str, min: f32, max: f32, step: f32, value: f32) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Slider { min, max, step },
            value: ControlValue::Number(value),
        }
    }

    pub fn toggle(key: &'static str, label: &'static str, value: bool) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Toggle,
            value: ControlValue::Bool(value),
        }
    }

    pub fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        value: usize,
    ) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Choice { options },
            value: ControlValue::Choice(value),
        }
    }

    pub fn button(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Button,
            value: ControlValue::Trigger,
        }
    }

    /// Check `value` against this control's kind. Numbers are clamped
    /// into the slider range; NaN falls back to the current value.
    pub fn coerce(&self, value: ControlValue) -> Result<ControlValue, ControlError> {
        match (&self.kind, value) {
            (ControlKind::Slider { min, max, .. }, ControlValue::Number(v)) => {
                if v.is_nan() {
                    Ok(self.value)
                } else {
                    Ok(ControlValue::Number(v.clamp(*min, *max)))
                }
            }
            (ControlKind::Toggle, ControlValue::Bool(_)) => Ok(value),
            (ControlKind::Choice { options }, ControlValue::Choice(i)) => {
                if i < options.len() {
                    Ok(value)
                } else {
                    Err(ControlError::NoSuchOption {
                        key: self.key.to_string(),
                        index: i,
                    })
                }
            }
            (ControlKind::Button, ControlValue::Trigger) => Ok(value),
            (kind, _) => Err(ControlError::WrongKind {
                key: self.key.to_string(),
                expected: match kind {
                    ControlKind::Slider { .. } => "number",
                    ControlKind::Toggle => "boolean",
                    ControlKind::Choice { .. } => "choice",
                    ControlKind::Button => "trigger",
                },
            }),
        }
    }
}

/// Find `key` among `controls` and coerce `value` for it.
pub fn resolve(
    animation: &'static str,
    controls: &[ControlDescriptor],
    key: &str,
    value: ControlValue,
) -> Result<ControlValue, ControlError> {
    controls
        .iter()
        .find(|c| c.key == key)
        .ok_or_else(|| ControlError::UnknownControl {
            animation,
            key: key.to_string(),
        })?
        .coerce(value)
}
