use serde::Serialize;

use crate::result::RenderMode;

/// Flat, serializable view of the session for presentation layers.
///
/// Every flag is derived from the state machine at the time of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: &'static str,
    pub conversation_id: Option<String>,
    pub render_mode: RenderMode,
    pub mode_locked: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub result_id: Option<String>,
}

impl SessionSnapshot {
    /// Placeholder text for the query input.
    pub fn query_placeholder(&self) -> &'static str {
        if self.conversation_id.is_some() {
            "Continue the conversation..."
        } else {
            "Describe the part you need..."
        }
    }

    /// Short conversation badge (first eight characters).
    pub fn conversation_badge(&self) -> Option<&str> {
        self.conversation_id
            .as_deref()
            .map(crate::result::short_id)
    }
}
