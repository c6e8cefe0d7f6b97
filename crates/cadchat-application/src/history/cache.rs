use cadchat_core::history::ConversationDetail;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory cache for loaded conversation details.
///
/// Details are fetched on first open and kept until the conversation changes
/// or disappears from the summary list.
pub struct HistoryCache {
    details: Arc<RwLock<HashMap<String, Arc<ConversationDetail>>>>,
}

impl HistoryCache {
    /// Creates a new empty HistoryCache.
    pub fn new() -> Self {
        Self {
            details: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets a cached detail by conversation ID.
    pub async fn get(&self, conversation_id: &str) -> Option<Arc<ConversationDetail>> {
        let details = self.details.read().await;
        details.get(conversation_id).cloned()
    }

    /// Inserts a detail into the cache, keyed by its own ID.
    pub async fn insert(&self, detail: Arc<ConversationDetail>) {
        let mut details = self.details.write().await;
        details.insert(detail.id.clone(), detail);
    }

    /// Removes a detail from the cache.
    pub async fn remove(&self, conversation_id: &str) {
        let mut details = self.details.write().await;
        details.remove(conversation_id);
    }

    /// Keeps only the entries for which `keep` returns true.
    pub async fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&ConversationDetail) -> bool,
    {
        let mut details = self.details.write().await;
        details.retain(|_, detail| keep(detail));
    }

    pub async fn len(&self) -> usize {
        self.details.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.details.read().await.is_empty()
    }

    /// Clears all cached details.
    pub async fn clear(&self) {
        let mut details = self.details.write().await;
        details.clear();
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new()
    }
}
