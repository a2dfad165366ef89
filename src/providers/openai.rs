//! OpenAI-compatible provider using the `/chat/completions` API.
//!
//! Works against any backend that speaks the OpenAI chat wire format,
//! including Ollama's `/v1` endpoint, so the base URL is configurable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    check_http_response, CompletionRequest, CompletionResponse, LlmProvider, ProviderError,
    UsageStats,
};

/// Default base URL: a local Ollama server's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Chat completions API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OpenAiRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum completion tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Always `false`; replies are consumed whole.
    pub stream: bool,
}

/// A message in OpenAI chat format.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OpenAiMessage {
    /// Role (`system`, `user`, `assistant`).
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Chat completions API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    /// Response choices.
    pub choices: Vec<OpenAiChoice>,
    /// Model that served the response.
    #[serde(default)]
    pub model: String,
    /// Token usage.
    pub usage: Option<OpenAiUsage>,
}

/// A response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// Assistant message for this choice.
    pub message: OpenAiResponseMessage,
}

/// Assistant message in a response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Optional text content.
    pub content: Option<String>,
}

/// Usage statistics.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiUsage {
    /// Prompt token count.
    pub prompt_tokens: Option<u32>,
    /// Completion token count.
    pub completion_tokens: Option<u32>,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completions provider.
#[derive(Debug, Clone)]
pub struct OpenAiCompatProvider {
    /// Base URL without a trailing slash, e.g. `http://localhost:11434/v1`.
    #[doc(hidden)]
    pub base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider for `model` served at `base_url`.
    ///
    /// `timeout` bounds each request end to end; `None` leaves requests
    /// unbounded.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Request` if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client: builder.build()?,
        })
    }

    /// Check whether the backend answers `GET {base_url}/models`.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        let request = self.authorize(self.client.get(&url));
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, url, "backend probe failed");
                false
            }
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("authorization", format!("Bearer {key}")),
            None => request,
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build a chat completions request body from a completion request.
#[doc(hidden)]
pub fn build_request(model: &str, request: &CompletionRequest) -> OpenAiRequest {
    let messages = request
        .messages
        .iter()
        .map(|msg| OpenAiMessage {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        })
        .collect();

    OpenAiRequest {
        model: model.to_owned(),
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        stream: false,
    }
}

/// Parse a chat completions response body, keeping the first choice.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body cannot be deserialized or has
/// no choices.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<CompletionResponse, ProviderError> {
    let parsed: OpenAiResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("chat completion body: {e}")))?;

    let Some(first) = parsed.choices.into_iter().next() else {
        return Err(ProviderError::Parse("chat completion has no choices".to_owned()));
    };

    let usage = parsed
        .usage
        .map(|counts| UsageStats {
            input_tokens: counts.prompt_tokens.unwrap_or_default(),
            output_tokens: counts.completion_tokens.unwrap_or_default(),
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: first.message.content.unwrap_or_default(),
        usage,
        model: parsed.model,
    })
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let body = build_request(&self.model, &request);
        let endpoint = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            "posting chat completion"
        );

        let response = self
            .authorize(self.client.post(&endpoint))
            .json(&body)
            .send()
            .await?;
        parse_response(&check_http_response(response).await?)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
