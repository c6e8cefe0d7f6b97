//! Conversation history DTOs.

use serde::Deserialize;

use cadchat_core::history::{
    ConversationDetail, ConversationMessage, ConversationSummary, MessageRole,
};

/// Body of `GET /conversations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationListDTO {
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
}

/// One message as stored by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMessageDTO {
    #[serde(default)]
    pub index: Option<usize>,
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub has_result: Option<bool>,
}

/// Body of `GET /conversation/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDetailDTO {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<ConversationMessageDTO>,
    #[serde(default)]
    pub current_object_id: Option<String>,
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl ConversationMessageDTO {
    /// `position` is used when the service omits the index.
    fn into_domain(self, position: usize) -> ConversationMessage {
        let role = match self.role.as_str() {
            "user" => MessageRole::User,
            "assistant" => MessageRole::Assistant,
            _ => MessageRole::Other,
        };
        let has_result = self
            .has_result
            .unwrap_or(role == MessageRole::Assistant && self.object_id.is_some());

        ConversationMessage {
            index: self.index.unwrap_or(position),
            role,
            content: self.content,
            timestamp: self.timestamp,
            object_id: self.object_id,
            error: self.error,
            has_result,
        }
    }
}

impl From<ConversationDetailDTO> for ConversationDetail {
    fn from(dto: ConversationDetailDTO) -> Self {
        ConversationDetail {
            id: dto.id,
            created_at: dto.created_at,
            messages: dto
                .messages
                .into_iter()
                .enumerate()
                .map(|(position, message)| message.into_domain(position))
                .collect(),
            current_object_id: dto.current_object_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_assigns_indices_and_derives_has_result() {
        let dto: ConversationDetailDTO = serde_json::from_value(json!({
            "id": "c1",
            "created_at": "2025-03-01T10:00:00",
            "messages": [
                {"role": "user", "content": "box", "timestamp": "2025-03-01T10:00:00"},
                {"role": "assistant", "content": "obj = ...", "timestamp": "2025-03-01T10:00:04",
                 "object_id": "o1", "error": null},
                {"role": "user", "content": "bigger", "timestamp": "2025-03-01T10:01:00"},
                {"role": "assistant", "content": "", "timestamp": "2025-03-01T10:01:09",
                 "object_id": null, "error": "Execution failed"}
            ],
            "current_object_id": "o1"
        }))
        .unwrap();

        let detail = ConversationDetail::from(dto);
        assert_eq!(detail.messages[3].index, 3);
        assert!(detail.messages[1].has_result);
        assert!(!detail.messages[3].has_result);
        assert_eq!(detail.selectable_messages().count(), 1);
    }
}
