//! HTTP implementation of the CAD service collaborator.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use cadchat_core::backend::{CadBackend, HistoricalResult};
use cadchat_core::config::BackendConfig;
use cadchat_core::error::{CadError, Result};
use cadchat_core::history::{ConversationDetail, ConversationSummary};
use cadchat_core::result::{CadResult, ExportFormat, RenderMode};

use crate::dto::{CadResponseDTO, ConversationDetailDTO, ConversationListDTO, QueryRequestDTO};

/// Timeout for the lightweight history endpoints.
const HISTORY_TIMEOUT: Duration = Duration::from_secs(30);

/// `CadBackend` over the service's JSON/HTTP API.
#[derive(Clone)]
pub struct HttpCadBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCadBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url().to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| CadError::fetch(format!("Failed to {}: {}", what, e)))
    }

    async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| CadError::fetch(format!("Failed to parse {} response: {}", what, e)))
    }

    /// Turns a non-success response into a fetch error, preferring the
    /// service's own error text.
    async fn error_from(response: Response, what: &str) -> CadError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<CadResponseDTO>(&body)
            .ok()
            .and_then(|dto| dto.failure())
            .unwrap_or(body);

        tracing::warn!("[HttpCadBackend] {} failed ({}): {}", what, status, detail);
        if detail.is_empty() {
            CadError::fetch(format!("{} failed ({})", what, status))
        } else {
            CadError::fetch(detail)
        }
    }
}

#[async_trait]
impl CadBackend for HttpCadBackend {
    async fn submit_query(
        &self,
        text: &str,
        conversation_id: Option<&str>,
        mode_hint: RenderMode,
    ) -> Result<CadResult> {
        let body = QueryRequestDTO::new(text, conversation_id, mode_hint);
        tracing::debug!(
            "[HttpCadBackend] POST /cad (conversation={:?}, mode={})",
            conversation_id,
            body.render_mode
        );

        let request = self
            .client
            .post(self.url("/cad"))
            .json(&body)
            .timeout(self.timeout);
        let response = self.send(request, "submit query").await?;

        // Failed generations come back as an error envelope with a 4xx/5xx status
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Query").await);
        }
        let dto: CadResponseDTO = Self::json(response, "query").await?;
        dto.into_result(conversation_id)
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let request = self
            .client
            .get(self.url("/conversations"))
            .timeout(HISTORY_TIMEOUT);
        let response = self.send(request, "list conversations").await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Conversation list").await);
        }

        let list: ConversationListDTO = Self::json(response, "conversation list").await?;
        Ok(list.conversations)
    }

    async fn get_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail> {
        let request = self
            .client
            .get(self.url(&format!("/conversation/{}", conversation_id)))
            .timeout(HISTORY_TIMEOUT);
        let response = self.send(request, "load conversation").await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CadError::not_found("conversation", conversation_id)),
            status if status.is_success() => {
                let dto: ConversationDetailDTO = Self::json(response, "conversation").await?;
                Ok(dto.into())
            }
            _ => Err(Self::error_from(response, "Conversation detail").await),
        }
    }

    async fn get_message_result(
        &self,
        conversation_id: &str,
        message_index: usize,
    ) -> Result<HistoricalResult> {
        let request = self
            .client
            .get(self.url(&format!(
                "/conversation/{}/message/{}",
                conversation_id, message_index
            )))
            .timeout(self.timeout);
        let response = self.send(request, "load message").await?;
        let status = response.status();

        // Recorded errors may arrive with any status; only an unreadable body
        // is a transport failure.
        let dto: CadResponseDTO = match Self::json(response, "message").await {
            Ok(dto) => dto,
            Err(err) if status.is_success() => return Err(err),
            Err(_) => return Err(CadError::fetch(format!("Message request failed ({})", status))),
        };

        if let Some(failure) = dto.failure() {
            return Ok(HistoricalResult::Failed(failure));
        }
        Ok(HistoricalResult::Found(dto.into_result(Some(conversation_id))?))
    }

    async fn download_artifact(&self, result_id: &str, format: ExportFormat) -> Result<Vec<u8>> {
        let request = self
            .client
            .get(self.url(&format!("/download/{}", result_id)))
            .query(&[("format", format.extension())])
            .timeout(self.timeout);
        let response = self.send(request, "download").await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, "Download").await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CadError::fetch(format!("Failed to read download: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let backend = HttpCadBackend::new(&BackendConfig {
            base_url: "http://cad.local:5001/".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(backend.base_url(), "http://cad.local:5001");
        assert_eq!(backend.url("/cad"), "http://cad.local:5001/cad");
    }
}
