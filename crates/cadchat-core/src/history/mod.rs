//! Conversation history projections.
//!
//! Read-only views of the remote conversation log. The session never mutates
//! them; they are owned and cached by the retrieval coordinator.

mod model;

pub use model::{ConversationDetail, ConversationMessage, ConversationSummary, MessageRole};
