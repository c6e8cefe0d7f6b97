//! Geometry payload normalizer.
//!
//! Validates a raw `[shape description, meshed instances]` payload and unpacks
//! it into a [`ShapeSet`] plus its part-state mapping. Every check is a hard
//! rejection: a payload is either fully usable, empty, or invalid.

use serde_json::Value;

use super::model::{ShapePart, ShapeSet, StateMap};
use crate::error::{CadError, Result};

/// Outcome of normalizing a payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    /// Nothing to show yet. Not an error.
    Empty,
    /// A validated shape set.
    Shapes(NormalizedShapes),
}

impl NormalizedPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedPayload::Empty)
    }

    /// Returns the shapes only when they are worth handing to a viewer.
    pub fn renderable(&self) -> Option<&NormalizedShapes> {
        match self {
            NormalizedPayload::Shapes(shapes) if shapes.shapes.is_renderable() => Some(shapes),
            _ => None,
        }
    }
}

/// A validated shape set together with the state mapping derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedShapes {
    pub shapes: ShapeSet,
    pub states: StateMap,
}

/// Normalizes a raw shape payload.
///
/// # Rules (checked in order)
///
/// 1. Not an array, or fewer than two elements → [`NormalizedPayload::Empty`]
/// 2. Shape description or mesh-instance table is null → `InvalidGeometryPayload`
/// 3. Shape description is not an object, or its `parts` is not an array →
///    `InvalidGeometryPayload`
///
/// A description without `parts` yields an empty part sequence.
pub fn normalize(payload: &Value) -> Result<NormalizedPayload> {
    let items = match payload.as_array() {
        Some(items) if items.len() >= 2 => items,
        _ => return Ok(NormalizedPayload::Empty),
    };

    let description = &items[0];
    let meshed_instances = &items[1];

    if description.is_null() || meshed_instances.is_null() {
        return Err(CadError::invalid_geometry(format!(
            "shapes present: {}, meshed instances present: {}",
            !description.is_null(),
            !meshed_instances.is_null()
        )));
    }

    let Some(object) = description.as_object() else {
        return Err(CadError::invalid_geometry(
            "shape description is not an object",
        ));
    };

    let parts = match object.get("parts") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(parts)) => parts.iter().cloned().map(ShapePart::from_value).collect(),
        Some(_) => {
            return Err(CadError::invalid_geometry(
                "shape description `parts` is not an array",
            ));
        }
    };

    let shapes = ShapeSet {
        description: description.clone(),
        parts,
        meshed_instances: meshed_instances.clone(),
    };
    let states = shapes.state_map();

    tracing::debug!(
        "[GeometryNormalizer] parts={}, states={}",
        shapes.parts.len(),
        states.len()
    );

    Ok(NormalizedPayload::Shapes(NormalizedShapes { shapes, states }))
}

/// Normalizes an optional payload; absence is treated as empty.
pub fn normalize_optional(payload: Option<&Value>) -> Result<NormalizedPayload> {
    match payload {
        Some(payload) => normalize(payload),
        None => Ok(NormalizedPayload::Empty),
    }
}
