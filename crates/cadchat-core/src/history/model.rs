//! Conversation history types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the CAD assistant.
    Assistant,
    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

/// Summary of one stored conversation, as shown in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    /// Creation timestamp (ISO 8601 format)
    pub created_at: String,
    /// First user message, truncated by the backend
    pub title: String,
    #[serde(default)]
    pub message_count: usize,
    /// Number of assistant replies that produced an object
    #[serde(default)]
    pub assistant_responses: usize,
    #[serde(default)]
    pub current_object_id: Option<String>,
}

impl ConversationSummary {
    /// Whether the conversation has any reply worth opening.
    pub fn has_replies(&self) -> bool {
        self.assistant_responses > 0
    }
}

/// A single message of a stored conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Position in the conversation, used to fetch its result
    pub index: usize,
    pub role: MessageRole,
    /// User text, or the generated code for assistant messages
    #[serde(default)]
    pub content: Option<String>,
    /// Timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Id of the object generated by this message
    #[serde(default)]
    pub object_id: Option<String>,
    /// Backend error recorded for this message
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub has_result: bool,
}

impl ConversationMessage {
    /// Only assistant messages that produced a result can be selected.
    pub fn is_selectable(&self) -> bool {
        self.role == MessageRole::Assistant && self.has_result
    }

    /// One-based reply number, counting user/assistant pairs.
    pub fn reply_number(&self) -> usize {
        self.index / 2 + 1
    }
}

/// Full message log of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub current_object_id: Option<String>,
}

impl ConversationDetail {
    /// Messages that may be offered for selection, in conversation order.
    pub fn selectable_messages(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter().filter(|m| m.is_selectable())
    }
}
