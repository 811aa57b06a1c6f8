//! HTTP client for the chat completions endpoint.

use super::sse::SseDecoder;
use super::wire;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use toolchat_application::ports::llm_provider::{
    CompletionRequest, LlmProvider, ProviderError, StreamHandle,
};
use toolchat_domain::{Completion, StreamEvent};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Events buffered between the reader task and the consumer
const STREAM_BUFFER: usize = 64;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// [`LlmProvider`] backed by an OpenAI-compatible HTTP API
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "no API key (set OPENAI_API_KEY or [provider].api_key)".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    async fn post(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        let body = wire::request_body(request, stream);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            stream,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(wire::http_error(status.as_u16(), &text));
        }
        Ok(response)
    }
}

fn send_error(e: reqwest::Error) -> ProviderError {
    if e.is_connect() || e.is_timeout() {
        ProviderError::Connection(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}

/// Pump the response body through the decoder until the stream ends.
async fn pump(mut response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut decoder = SseDecoder::new();
    loop {
        let events = match response.chunk().await {
            Ok(Some(bytes)) => decoder.feed(&bytes),
            Ok(None) => {
                let mut events = decoder.finish();
                if !decoder.is_done() {
                    events.push(StreamEvent::Completed);
                }
                for event in events {
                    let _ = tx.send(event).await;
                }
                return;
            }
            Err(e) => {
                warn!("Stream interrupted: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };
        for event in events {
            let terminal = event.is_terminal();
            if tx.send(event).await.is_err() {
                // Consumer dropped the handle
                return;
            }
            if terminal {
                return;
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let response = self.post(request, false).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        wire::parse_completion(&text)
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<StreamHandle, ProviderError> {
        let response = self.post(request, true).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump(response, tx));
        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(
            OpenAiProvider::new(OpenAiConfig::new("  ")),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_completions_url() {
        let config = OpenAiConfig::new("sk-test").with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(
            OpenAiConfig::new("k").completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAiProvider::new(OpenAiConfig::new("sk-test")).unwrap();
        assert_eq!(provider.name(), "openai");
    }
}
