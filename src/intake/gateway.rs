//! The only path from a session to the model backend.

use std::sync::Arc;

use tracing::{debug, info};

use crate::providers::{CompletionRequest, LlmProvider, Message, ProviderError};

use super::cache::ResponseCache;

/// Sampling temperature for every interview completion.
pub const TEMPERATURE: f32 = 0.7;

/// Output-length cap for every interview completion.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Failure talking to the model backend.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport or protocol failure from the provider.
    #[error("backend error: {0}")]
    Backend(#[from] ProviderError),
}

/// Wraps a provider with fixed sampling parameters and the session cache.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn LlmProvider>,
}

impl std::fmt::Debug for CompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGateway")
            .field("model", &self.provider.model_id())
            .finish_non_exhaustive()
    }
}

impl CompletionGateway {
    /// Create a gateway over `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Model the underlying provider talks to.
    pub fn model(&self) -> &str {
        self.provider.model_id()
    }

    /// Complete `history`, consulting and filling `cache` when `use_cache`
    /// is set.
    ///
    /// `history` is sent as given; callers pass the sanitized copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the provider call fails. Nothing
    /// is cached in that case.
    pub async fn complete(
        &self,
        cache: &mut ResponseCache,
        history: &[Message],
        use_cache: bool,
    ) -> Result<String, GatewayError> {
        let key = use_cache.then(|| cache.key_for(history));

        if let Some(cached) = key.as_deref().and_then(|k| cache.get(k)) {
            debug!(model = self.model(), cache_hit = true, "serving cached reply");
            return Ok(cached.to_owned());
        }

        let request = CompletionRequest {
            messages: history.to_vec(),
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_OUTPUT_TOKENS),
        };

        let response = self.provider.complete(request).await?;
        info!(
            model = self.model(),
            cache_hit = false,
            messages = history.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion received"
        );

        if let Some(key) = key {
            if !response.content.is_empty() {
                cache.put(key, response.content.clone());
            }
        }

        Ok(response.content)
    }
}
