//! Query and result DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cadchat_core::error::{CadError, Result};
use cadchat_core::result::{CadResult, RenderMode};

/// Body of `POST /cad`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequestDTO<'a> {
    pub query: &'a str,
    pub conversation_id: Option<&'a str>,
    pub render_mode: &'static str,
}

impl<'a> QueryRequestDTO<'a> {
    pub fn new(query: &'a str, conversation_id: Option<&'a str>, mode_hint: RenderMode) -> Self {
        Self {
            query,
            conversation_id,
            render_mode: mode_hint.as_wire(),
        }
    }
}

/// Response of `POST /cad` and of the message-result endpoint.
///
/// Failures come back in the same envelope with `error` (and sometimes
/// `message`, `details`, `retry_count` or `suggestion`) set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CadResponseDTO {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub render_mode: Option<String>,
    /// `[shape description, meshed instances]`
    #[serde(default)]
    pub shapes: Option<Value>,
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Validation errors of a rejected request
    #[serde(default)]
    pub details: Option<Value>,
    /// Generation attempts made before giving up
    #[serde(default)]
    pub retry_count: Option<u32>,
    /// Backend hint such as `try_2d_mode`
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Hint value asking the user to retry in 2D.
const TRY_2D_MODE: &str = "try_2d_mode";

impl CadResponseDTO {
    /// Backend-reported failure text, if any.
    pub fn failure(&self) -> Option<String> {
        let text = match (&self.error, &self.message) {
            (Some(error), Some(message)) => format!("{}: {}", error, message),
            (Some(error), None) => error.clone(),
            (None, _) if self.success == Some(false) => self
                .message
                .clone()
                .unwrap_or_else(|| "Request failed".to_string()),
            _ => return None,
        };
        Some(self.annotate(text))
    }

    /// Appends validation details, attempt count and suggestion to a failure.
    fn annotate(&self, mut text: String) -> String {
        if let Some(details) = self.details_text() {
            text.push_str(&format!(" ({})", details));
        }
        if let Some(count) = self.retry_count {
            let unit = if count == 1 { "attempt" } else { "attempts" };
            text.push_str(&format!(" after {} {}", count, unit));
        }
        match self.suggestion.as_deref() {
            Some(TRY_2D_MODE) => text.push_str(" (try 2D mode)"),
            Some(other) if !other.is_empty() => text.push_str(&format!(" ({})", other)),
            _ => {}
        }
        text
    }

    fn details_text(&self) -> Option<String> {
        let items: Vec<String> = match self.details.as_ref()? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Value::String(s) => vec![s.clone()],
            Value::Null => Vec::new(),
            other => vec![other.to_string()],
        };
        (!items.is_empty()).then(|| items.join("; "))
    }

    /// Render mode of the payload.
    ///
    /// Older records carry no mode; those are 2D when they hold vector
    /// markup and 3D otherwise.
    fn render_mode(&self) -> RenderMode {
        self.render_mode
            .as_deref()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or(if self.svg.is_some() {
                RenderMode::TwoD
            } else {
                RenderMode::ThreeD
            })
    }

    /// Converts a successful response into a domain result.
    ///
    /// `fallback_conversation` is used when the body omits the conversation
    /// id (message results are fetched per conversation).
    pub fn into_result(self, fallback_conversation: Option<&str>) -> Result<CadResult> {
        if let Some(failure) = self.failure() {
            return Err(CadError::fetch(failure));
        }

        let render_mode = self.render_mode();
        let id = self
            .id
            .ok_or_else(|| CadError::fetch("Response is missing the object id"))?;
        let conversation_id = self
            .conversation_id
            .or_else(|| fallback_conversation.map(str::to_string))
            .ok_or_else(|| CadError::fetch("Response is missing the conversation id"))?;

        Ok(CadResult {
            id,
            conversation_id,
            render_mode,
            shapes: self.shapes,
            svg: self.svg,
            code: self.code,
            note: self.note,
            generator: self.generator,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_uses_wire_mode() {
        let body = serde_json::to_value(QueryRequestDTO::new("gear", None, RenderMode::TwoD)).unwrap();
        assert_eq!(
            body,
            json!({"query": "gear", "conversation_id": null, "render_mode": "2d"})
        );
    }

    #[test]
    fn test_three_d_response_converts() {
        let dto: CadResponseDTO = serde_json::from_value(json!({
            "success": true,
            "id": "a1b2",
            "shapes": [{"parts": []}, [{}]],
            "code": "obj = cq.Workplane()",
            "render_mode": "3d",
            "conversation_id": "c1",
            "generator": "cadquery"
        }))
        .unwrap();

        let result = dto.into_result(None).unwrap();
        assert_eq!(result.render_mode, RenderMode::ThreeD);
        assert_eq!(result.conversation_id, "c1");
        assert_eq!(result.generator.as_deref(), Some("cadquery"));
        assert!(result.shapes.is_some());
    }

    #[test]
    fn test_error_envelope_becomes_fetch_error() {
        let dto: CadResponseDTO = serde_json::from_value(json!({
            "success": false,
            "error": "Could not build the part",
            "conversation_id": "c1"
        }))
        .unwrap();

        assert_eq!(
            dto.into_result(None).unwrap_err(),
            CadError::fetch("Could not build the part")
        );
    }

    #[test]
    fn test_failed_generation_keeps_attempts_and_2d_hint() {
        let dto: CadResponseDTO = serde_json::from_value(json!({
            "success": false,
            "error": "Could not tessellate",
            "suggestion": "try_2d_mode",
            "conversation_id": "c1",
            "retry_count": 3
        }))
        .unwrap();

        let err = dto.into_result(None).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Could not tessellate after 3 attempts (try 2D mode)"
        );
    }

    #[test]
    fn test_validation_details_are_listed() {
        let dto: CadResponseDTO = serde_json::from_value(json!({
            "error": "Invalid request",
            "details": ["query is required", "render_mode must be 2d or 3d"]
        }))
        .unwrap();

        assert_eq!(
            dto.failure().as_deref(),
            Some("Invalid request (query is required; render_mode must be 2d or 3d)")
        );
    }

    #[test]
    fn test_missing_mode_is_inferred_and_conversation_falls_back() {
        let dto: CadResponseDTO = serde_json::from_value(json!({
            "id": "s1",
            "svg": "<svg/>",
            "message_index": 3
        }))
        .unwrap();

        let result = dto.into_result(Some("c7")).unwrap();
        assert_eq!(result.render_mode, RenderMode::TwoD);
        assert_eq!(result.conversation_id, "c7");
    }
}
