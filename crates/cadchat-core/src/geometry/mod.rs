//! Geometry domain module.
//!
//! Typed view over the raw `[shape description, meshed instances]` payload
//! produced by the remote tessellator, and the normalizer that builds it.

mod model;
mod normalizer;

pub use model::{PartState, ShapePart, ShapeSet, StateMap};
pub use normalizer::{NormalizedPayload, NormalizedShapes, normalize, normalize_optional};
