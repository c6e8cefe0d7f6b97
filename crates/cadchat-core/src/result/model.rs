//! Result domain model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Presentation mode a result is rendered in.
///
/// Sent to the backend as a hint with every query; the mode echoed back on the
/// result is authoritative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum RenderMode {
    #[default]
    #[serde(rename = "3d", alias = "3D")]
    #[strum(to_string = "3D")]
    ThreeD,
    #[serde(rename = "2d", alias = "2D")]
    #[strum(to_string = "2D")]
    TwoD,
}

impl RenderMode {
    /// Wire representation used by the backend (`"3d"` / `"2d"`).
    pub fn as_wire(&self) -> &'static str {
        match self {
            RenderMode::ThreeD => "3d",
            RenderMode::TwoD => "2d",
        }
    }
}

/// One backend response carrying geometry or 2D/textual content plus its mode
/// and conversation linkage.
///
/// Immutable once received; the session shares it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadResult {
    /// Generated object identifier, also the download key
    pub id: String,
    /// Conversation this result belongs to (authoritative)
    pub conversation_id: String,
    /// Mode the backend produced this result in (authoritative)
    pub render_mode: RenderMode,
    /// Raw `[shape description, meshed instances]` payload for 3D results
    #[serde(default)]
    pub shapes: Option<Value>,
    /// Vector markup for 2D results
    #[serde(default)]
    pub svg: Option<String>,
    /// Generated source code
    #[serde(default)]
    pub code: Option<String>,
    /// Free-form note from the backend
    #[serde(default)]
    pub note: Option<String>,
    /// Name of the generator that produced the result (e.g. "cadquery")
    #[serde(default)]
    pub generator: Option<String>,
    /// Backend error recorded on this result
    #[serde(default)]
    pub error: Option<String>,
}

impl CadResult {
    /// Creates a bare result with no content attached.
    pub fn new(
        id: impl Into<String>,
        conversation_id: impl Into<String>,
        render_mode: RenderMode,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_id: conversation_id.into(),
            render_mode,
            shapes: None,
            svg: None,
            code: None,
            note: None,
            generator: None,
            error: None,
        }
    }

    pub fn with_shapes(mut self, shapes: Value) -> Self {
        self.shapes = Some(shapes);
        self
    }

    pub fn with_svg(mut self, svg: impl Into<String>) -> Self {
        self.svg = Some(svg.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Short form of the conversation id for display badges.
    pub fn short_conversation_id(&self) -> &str {
        short_id(&self.conversation_id)
    }
}

/// First eight characters of an identifier, respecting char boundaries.
pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_render_mode_wire_format() {
        assert_eq!(serde_json::to_string(&RenderMode::TwoD).unwrap(), "\"2d\"");
        let mode: RenderMode = serde_json::from_str("\"3D\"").unwrap();
        assert_eq!(mode, RenderMode::ThreeD);
        assert_eq!(RenderMode::from_str("2d").unwrap(), RenderMode::TwoD);
        assert_eq!(RenderMode::TwoD.to_string(), "2D");
    }

    #[test]
    fn test_result_deserializes_with_missing_optionals() {
        let json = r#"{"id":"20250101","conversation_id":"c1","render_mode":"2d","svg":"<svg/>"}"#;
        let result: CadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.render_mode, RenderMode::TwoD);
        assert_eq!(result.svg.as_deref(), Some("<svg/>"));
        assert!(result.shapes.is_none());
        assert!(result.code.is_none());
    }

    #[test]
    fn test_short_conversation_id() {
        let result = CadResult::new("o1", "2025-01-01T10-00-00", RenderMode::ThreeD);
        assert_eq!(result.short_conversation_id(), "2025-01-");
        assert_eq!(short_id("c1"), "c1");
    }
}
