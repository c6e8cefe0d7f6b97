//! Shape set domain model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from part id to its visual state, in part-id order.
pub type StateMap = BTreeMap<String, PartState>;

/// Opaque per-part visual state record.
///
/// The record is passed through to the viewer engine untouched. The accessors
/// only read the well-known keys: `selected`, `opacity` and `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartState(Value);

impl PartState {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether the part belongs to the selected mesh batch.
    pub fn is_selected(&self) -> bool {
        self.0
            .get("selected")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Opacity override in `[0, 1]`, if any.
    pub fn opacity(&self) -> Option<f64> {
        self.0
            .get("opacity")
            .and_then(Value::as_f64)
            .map(|o| o.clamp(0.0, 1.0))
    }

    /// Color override (CSS hex string), if any.
    pub fn color(&self) -> Option<&str> {
        self.0.get("color").and_then(Value::as_str)
    }
}

/// One entry of the shape description's `parts` sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePart {
    /// Part id, unique within its shape set
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Visual state record
    pub state: Option<PartState>,
    /// The raw part entry as received
    pub raw: Value,
}

impl ShapePart {
    /// Reads the known fields out of a raw part entry.
    ///
    /// Non-string ids and null states count as missing.
    pub fn from_value(raw: Value) -> Self {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let name = raw.get("name").and_then(Value::as_str).map(str::to_string);
        let state = raw
            .get("state")
            .filter(|state| !state.is_null())
            .cloned()
            .map(PartState::new);

        Self {
            id,
            name,
            state,
            raw,
        }
    }

    /// Returns the `(id, state)` pair when both are present.
    pub fn state_entry(&self) -> Option<(&str, &PartState)> {
        match (&self.id, &self.state) {
            (Some(id), Some(state)) => Some((id.as_str(), state)),
            _ => None,
        }
    }
}

/// Paired topology description and mesh-instance table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSet {
    /// Full shape description object (name, bounding box, parts, ...)
    pub description: Value,
    /// Parsed `parts` sequence, in payload order
    pub parts: Vec<ShapePart>,
    /// Opaque mesh-instance table
    pub meshed_instances: Value,
}

impl ShapeSet {
    /// Builds the part id → state mapping.
    ///
    /// Parts without an id or without a state are skipped.
    pub fn state_map(&self) -> StateMap {
        self.parts
            .iter()
            .filter_map(ShapePart::state_entry)
            .map(|(id, state)| (id.to_string(), state.clone()))
            .collect()
    }

    /// Whether both halves carry content worth handing to a viewer.
    pub fn is_renderable(&self) -> bool {
        !self.parts.is_empty() && !is_empty_table(&self.meshed_instances)
    }
}

fn is_empty_table(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
