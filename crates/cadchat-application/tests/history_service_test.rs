use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cadchat_application::HistoryService;
use cadchat_core::backend::{CadBackend, HistoricalResult};
use cadchat_core::error::{CadError, Result};
use cadchat_core::history::{
    ConversationDetail, ConversationMessage, ConversationSummary, MessageRole,
};
use cadchat_core::result::{CadResult, ExportFormat, RenderMode};

// Mock backend serving a mutable conversation list
struct MockHistoryBackend {
    summaries: Mutex<Vec<ConversationSummary>>,
    detail_fetches: Mutex<Vec<String>>,
}

impl MockHistoryBackend {
    fn new(summaries: Vec<ConversationSummary>) -> Self {
        Self {
            summaries: Mutex::new(summaries),
            detail_fetches: Mutex::new(Vec::new()),
        }
    }
}

fn summary(id: &str, message_count: usize) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        created_at: "2025-03-01T10:00:00".to_string(),
        title: format!("conversation {}", id),
        message_count,
        assistant_responses: message_count / 2,
        current_object_id: None,
    }
}

#[async_trait]
impl CadBackend for MockHistoryBackend {
    async fn submit_query(
        &self,
        _text: &str,
        _conversation_id: Option<&str>,
        _mode_hint: RenderMode,
    ) -> Result<CadResult> {
        Err(CadError::internal("not used"))
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        Ok(self.summaries.lock().unwrap().clone())
    }

    async fn get_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail> {
        self.detail_fetches
            .lock()
            .unwrap()
            .push(conversation_id.to_string());
        let count = self
            .summaries
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == conversation_id)
            .map(|s| s.message_count)
            .ok_or_else(|| CadError::not_found("conversation", conversation_id))?;

        let messages = (0..count)
            .map(|index| ConversationMessage {
                index,
                role: if index % 2 == 0 {
                    MessageRole::User
                } else {
                    MessageRole::Assistant
                },
                content: None,
                timestamp: "2025-03-01T10:00:00".to_string(),
                object_id: (index % 2 == 1).then(|| format!("obj-{}", index)),
                error: None,
                has_result: index % 2 == 1,
            })
            .collect();

        Ok(ConversationDetail {
            id: conversation_id.to_string(),
            created_at: "2025-03-01T10:00:00".to_string(),
            messages,
            current_object_id: None,
        })
    }

    async fn get_message_result(
        &self,
        _conversation_id: &str,
        _message_index: usize,
    ) -> Result<HistoricalResult> {
        Err(CadError::internal("not used"))
    }

    async fn download_artifact(&self, _result_id: &str, _format: ExportFormat) -> Result<Vec<u8>> {
        Err(CadError::internal("not used"))
    }
}

#[tokio::test]
async fn test_refresh_replaces_summaries() {
    let backend = Arc::new(MockHistoryBackend::new(vec![summary("a", 2)]));
    let history = HistoryService::new(backend.clone());
    assert!(history.summaries().await.is_empty());

    history.refresh().await.unwrap();
    *backend.summaries.lock().unwrap() = vec![summary("b", 4), summary("c", 2)];
    let summaries = history.refresh().await.unwrap();

    let ids: Vec<String> = summaries.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(history.summaries().await, summaries);
}

#[tokio::test]
async fn test_refresh_drops_changed_or_removed_details() {
    let backend = Arc::new(MockHistoryBackend::new(vec![
        summary("a", 2),
        summary("b", 2),
        summary("c", 2),
    ]));
    let history = HistoryService::new(backend.clone());
    history.refresh().await.unwrap();
    for id in ["a", "b", "c"] {
        history.detail(id).await.unwrap();
    }
    assert_eq!(history.cached_details().await, 3);

    // a unchanged, b gained a reply, c deleted
    *backend.summaries.lock().unwrap() = vec![summary("a", 2), summary("b", 4)];
    history.refresh().await.unwrap();
    assert_eq!(history.cached_details().await, 1);

    let replies = history.replies("b").await.unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1].label, "Reply 2");
    assert_eq!(
        backend.detail_fetches.lock().unwrap().clone(),
        vec!["a", "b", "c", "b"]
    );
}

#[tokio::test]
async fn test_unknown_conversation_is_not_found() {
    let history = HistoryService::new(Arc::new(MockHistoryBackend::new(Vec::new())));
    let err = history.detail("missing").await.unwrap_err();
    assert!(err.is_not_found());
}
