//! Remote CAD service collaborator.
//!
//! Defines the interface the core consumes for queries, history and
//! downloads, decoupling it from the transport (HTTP, test doubles, ...).

use async_trait::async_trait;

use crate::error::Result;
use crate::history::{ConversationDetail, ConversationSummary};
use crate::result::{CadResult, ExportFormat, RenderMode};

/// Outcome of fetching the result recorded for one historical message.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoricalResult {
    /// The message's result could be reconstructed.
    Found(CadResult),
    /// The backend recorded (or hit) an error for this message.
    Failed(String),
}

/// An abstract client for the remote CAD generation service.
///
/// # Implementation Notes
///
/// - `submit_query` returns a result whose `render_mode` and
///   `conversation_id` are authoritative; the mode passed in is only a hint.
/// - Backend-reported errors on a query are returned as `CadError::Fetch`.
#[async_trait]
pub trait CadBackend: Send + Sync {
    /// Submits a natural-language query, continuing `conversation_id` if given.
    async fn submit_query(
        &self,
        text: &str,
        conversation_id: Option<&str>,
        mode_hint: RenderMode,
    ) -> Result<CadResult>;

    /// Lists stored conversations, most recent first.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>>;

    /// Loads the full message log of one conversation.
    async fn get_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail>;

    /// Fetches the result recorded for one message.
    async fn get_message_result(
        &self,
        conversation_id: &str,
        message_index: usize,
    ) -> Result<HistoricalResult>;

    /// Downloads a generated artifact.
    async fn download_artifact(&self, result_id: &str, format: ExportFormat) -> Result<Vec<u8>>;
}
