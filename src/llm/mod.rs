//! LLM — provider adapter for the stock-insights agent.
//!
//! DESIGN
//! ======
//! Provider-neutral types live in `types`; the single concrete provider is
//! the Google Generative Language API in `gemini`. `LlmClient` is the
//! configured entry point and implements the `LlmChat` trait the chat
//! service depends on, so tests can substitute a mock.

pub mod config;
pub mod gemini;
pub mod tools;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message, Tool};

// =============================================================================
// CLIENT
// =============================================================================

/// Configured LLM client backed by the Gemini API.
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `LLM_API_KEY_ENV`: name of the env var holding the API key
    ///   (e.g. `GEMINI_API_KEY`)
    /// - `LLM_MODEL`: model name (default `gemini-2.0-flash`)
    /// - `LLM_BASE_URL`: custom base URL for compatible APIs
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gemini-2.0-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        self.inner
            .chat(&self.model, max_tokens, system, messages, tools)
            .await
    }
}
