use std::collections::HashMap;
use std::sync::Arc;

use cadchat_core::backend::CadBackend;
use cadchat_core::error::Result;
use cadchat_core::history::{ConversationDetail, ConversationSummary};
use tokio::sync::RwLock;

use super::cache::HistoryCache;
use super::menu::{ReplyEntry, reply_entries};

/// Coordinates history retrieval.
///
/// # Responsibilities
///
/// - Keeping the conversation summary list (replaced on every refresh)
/// - Loading conversation details on demand and caching them
/// - Dropping cached details that are outdated by a refresh or a new reply
pub struct HistoryService {
    backend: Arc<dyn CadBackend>,
    summaries: RwLock<Vec<ConversationSummary>>,
    details: HistoryCache,
}

impl HistoryService {
    pub fn new(backend: Arc<dyn CadBackend>) -> Self {
        Self {
            backend,
            summaries: RwLock::new(Vec::new()),
            details: HistoryCache::new(),
        }
    }

    /// Reloads the summary list from the backend.
    ///
    /// Cached details are kept only for conversations that are still listed
    /// with an unchanged message count.
    pub async fn refresh(&self) -> Result<Vec<ConversationSummary>> {
        let summaries = self.backend.list_conversations().await?;

        let counts: HashMap<&str, usize> = summaries
            .iter()
            .map(|s| (s.id.as_str(), s.message_count))
            .collect();
        self.details
            .retain(|detail| counts.get(detail.id.as_str()) == Some(&detail.messages.len()))
            .await;

        tracing::debug!(
            "[HistoryService] Loaded {} conversations",
            summaries.len()
        );
        *self.summaries.write().await = summaries.clone();
        Ok(summaries)
    }

    /// Summaries from the last refresh.
    pub async fn summaries(&self) -> Vec<ConversationSummary> {
        self.summaries.read().await.clone()
    }

    /// Returns a conversation's detail, fetching it on first access.
    pub async fn detail(&self, conversation_id: &str) -> Result<Arc<ConversationDetail>> {
        if let Some(detail) = self.details.get(conversation_id).await {
            return Ok(detail);
        }

        let detail = Arc::new(self.backend.get_conversation_detail(conversation_id).await?);
        tracing::debug!(
            "[HistoryService] Loaded detail for {} ({} messages)",
            conversation_id,
            detail.messages.len()
        );
        self.details.insert(detail.clone()).await;
        Ok(detail)
    }

    /// Selectable replies of a conversation.
    pub async fn replies(&self, conversation_id: &str) -> Result<Vec<ReplyEntry>> {
        let detail = self.detail(conversation_id).await?;
        Ok(reply_entries(&detail))
    }

    /// Forgets a conversation's cached detail, e.g. after a new reply landed.
    pub async fn invalidate(&self, conversation_id: &str) {
        self.details.remove(conversation_id).await;
    }

    pub async fn cached_details(&self) -> usize {
        self.details.len().await
    }
}
