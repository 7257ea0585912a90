//! Declared input schemas for the host boundary.
//!
//! Each transform exposes the inputs it expects as data:
//! `{name: {kind, default, min, max, step}}`. A host runtime reads the
//! schema, validates arguments against it, and invokes the transform
//! with a complete, type-matching argument set. The host itself is an
//! external collaborator; nothing here assumes how the schema is
//! displayed or wired.

use serde::Serialize;

/// The kind of value an input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A 3-channel image (or batch of images).
    Image,
    /// A single-channel mask (or batch of masks).
    Mask,
    /// A scalar float shared across every batch item.
    Float,
}

/// Declared constraints for one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Value kind.
    pub kind: ParamKind,
    /// Default value, for float parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    /// Inclusive lower bound, for float parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound, for float parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Suggested UI step, for float parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl ParamSpec {
    /// An image input.
    pub fn image() -> Self {
        Self {
            kind: ParamKind::Image,
            default: None,
            min: None,
            max: None,
            step: None,
        }
    }

    /// A mask input.
    pub fn mask() -> Self {
        Self {
            kind: ParamKind::Mask,
            default: None,
            min: None,
            max: None,
            step: None,
        }
    }

    /// A bounded float parameter.
    pub fn float(default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            kind: ParamKind::Float,
            default: Some(default),
            min: Some(min),
            max: Some(max),
            step: Some(step),
        }
    }
}

/// One named input in a transform schema.
#[derive(Debug, Clone, Serialize)]
pub struct InputSpec {
    /// Parameter name as the host sees it.
    pub name: &'static str,
    /// Declared constraints.
    #[serde(flatten)]
    pub spec: ParamSpec,
}

/// Declared input schema of a transform.
#[derive(Debug, Clone, Serialize)]
pub struct TransformSchema {
    /// Transform name.
    pub name: &'static str,
    /// Inputs in declaration order.
    pub inputs: Vec<InputSpec>,
}

impl TransformSchema {
    /// Creates a schema from (name, spec) pairs.
    pub fn new(name: &'static str, inputs: Vec<(&'static str, ParamSpec)>) -> Self {
        Self {
            name,
            inputs: inputs
                .into_iter()
                .map(|(name, spec)| InputSpec { name, spec })
                .collect(),
        }
    }
}
