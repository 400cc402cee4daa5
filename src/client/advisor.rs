use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Anything that can answer a farming question for the chat loop.
///
/// Implementations are total: every outcome, failures included, is turned
/// into text the conversation can display.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, question: &str, language: &str) -> String;
}

/// HTTP client for the advisory backend's `POST /ask` endpoint.
///
/// [`AdvisorClient::ask`] never fails: transport errors, non-2xx statuses
/// and answerless responses are logged and replaced by one of the fixed
/// replies in [`crate::client`]. [`AdvisorClient::try_ask`] exposes the
/// typed outcome for callers that need to tell them apart.
///
/// One request per call, no retries and no timeout of its own.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    http: reqwest::Client,
    base_url: String,
}

impl AdvisorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }

    pub async fn try_ask(&self, question: &str, language: &str) -> Result<String> {
        let request = AskRequest::new(question, language);
        let url = self.ask_url();

        debug!("Posting question to {} (language: {})", url, language);

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let payload: AskResponse = response.json().await?;
        debug!("Backend responded with status {}", status);

        payload.into_answer().ok_or(Error::MissingAnswer)
    }

    pub async fn ask(&self, question: &str, language: &str) -> String {
        match self.try_ask(question, language).await {
            Ok(answer) => answer,
            Err(Error::Status {
                status,
                reason,
                body,
            }) => {
                error!("Backend returned error: {} {} - {}", status, reason, body);
                SERVER_ERROR_REPLY.to_string()
            }
            Err(Error::MissingAnswer) => {
                warn!("Backend returned no answer field. Returning default message.");
                NO_ANSWER_REPLY.to_string()
            }
            Err(e) => {
                error!("Error contacting backend at {}: {}", self.base_url, e);
                CONTACT_ERROR_REPLY.to_string()
            }
        }
    }
}

#[async_trait]
impl Responder for AdvisorClient {
    async fn respond(&self, question: &str, language: &str) -> String {
        self.ask(question, language).await
    }
}
