//! Fluent client builder
//!
//! Binds to exactly one provider and one capability at a time: `provider(..)`
//! picks the backend, chained setters capture request defaults, and a
//! terminal method (`build`, `build_streaming`, ...) validates the chosen
//! provider actually supports the requested capability before constructing
//! it. There is no registry or router behind this — the returned handle talks
//! to one provider for its whole lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::core::providers::anthropic::{AnthropicConfig, AnthropicProvider};
use crate::core::providers::deepseek::{DeepSeekConfig, DeepSeekProvider};
use crate::core::providers::elevenlabs::{ElevenLabsConfig, ElevenLabsProvider};
use crate::core::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::core::providers::groq::{GroqConfig, GroqProvider};
use crate::core::providers::ollama::{OllamaConfig, OllamaProvider};
use crate::core::providers::openai::{OpenAIConfig, OpenAIProvider};
use crate::core::providers::phind::{PhindConfig, PhindProvider};
use crate::core::providers::xai::{XAIConfig, XAIProvider};
use crate::core::providers::base::{ChatDefaults, ChatHandle};
use crate::core::traits::provider::{Chat, Embedding, StreamingChat, Tts};
use crate::core::types::{ResponseFormat, Tool, ToolChoice};
use crate::utils::error::{GatewayError, Result};

/// Which backend a `Builder` is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Gemini,
    DeepSeek,
    Groq,
    XAI,
    Ollama,
    Phind,
    ElevenLabs,
}

impl ProviderId {
    fn name(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Groq => "groq",
            Self::XAI => "xai",
            Self::Ollama => "ollama",
            Self::Phind => "phind",
            Self::ElevenLabs => "elevenlabs",
        }
    }
}

/// HTTP-layer overrides applied on top of whatever the provider's own config
/// sets up by default; passed to `Builder::http`.
#[derive(Debug, Clone, Default)]
pub struct HttpBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<String>,
    headers: HashMap<String, String>,
    bypass_ssl_verification: bool,
}

impl HttpBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bypass_ssl_verification(mut self, bypass: bool) -> Self {
        self.bypass_ssl_verification = bypass;
        self
    }
}

/// Fluent, chainable client builder. Immutable once `build*` is called: every
/// setter takes and returns `self` by value, so a partially-configured
/// builder can't be mutated out from under a caller holding onto it.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    provider: Option<ProviderId>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    top_p: Option<f32>,
    top_k: Option<u32>,
    system_prompt: Option<String>,
    stream: bool,
    tools: Option<Vec<Tool>>,
    tool_choice: Option<ToolChoice>,
    reasoning: bool,
    reasoning_effort: Option<String>,
    json_schema: Option<serde_json::Value>,
    http: HttpBuilder,
    extensions: HashMap<String, serde_json::Value>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, id: ProviderId) -> Self {
        self.provider = Some(id);
        self
    }

    pub fn openai(self) -> Self {
        self.provider(ProviderId::OpenAI)
    }

    pub fn anthropic(self) -> Self {
        self.provider(ProviderId::Anthropic)
    }

    pub fn gemini(self) -> Self {
        self.provider(ProviderId::Gemini)
    }

    pub fn deepseek(self) -> Self {
        self.provider(ProviderId::DeepSeek)
    }

    pub fn groq(self) -> Self {
        self.provider(ProviderId::Groq)
    }

    pub fn xai(self) -> Self {
        self.provider(ProviderId::XAI)
    }

    pub fn ollama(self) -> Self {
        self.provider(ProviderId::Ollama)
    }

    pub fn phind(self) -> Self {
        self.provider(ProviderId::Phind)
    }

    pub fn elevenlabs(self) -> Self {
        self.provider(ProviderId::ElevenLabs)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub fn reasoning(mut self, enabled: bool) -> Self {
        self.reasoning = enabled;
        self
    }

    pub fn reasoning_effort(mut self, effort: impl Into<String>) -> Self {
        self.reasoning_effort = Some(effort.into());
        self
    }

    pub fn json_schema(mut self, schema: serde_json::Value) -> Self {
        self.json_schema = Some(schema);
        self
    }

    /// Configure HTTP-layer settings via a sub-builder
    pub fn http(mut self, f: impl FnOnce(HttpBuilder) -> HttpBuilder) -> Self {
        self.http = f(self.http);
        self
    }

    /// Attach a provider-specific extension value (e.g. `embedding_task_type`,
    /// `thinking_budget_tokens`, `safety_settings`); carried through to the
    /// request's `extra_params` map.
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    fn require_provider(&self) -> Result<ProviderId> {
        self.provider
            .ok_or_else(|| GatewayError::invalid_request("no provider selected"))
    }

    fn require_model(&self, default: &str) -> String {
        self.model.clone().unwrap_or_else(|| default.to_string())
    }

    fn chat_defaults(&self, default_model: &str) -> ChatDefaults {
        let mut extra_params = self.extensions.clone();
        if let Some(top_k) = self.top_k {
            extra_params.insert("top_k".to_string(), serde_json::json!(top_k));
        }
        if self.reasoning {
            extra_params.insert("reasoning".to_string(), serde_json::json!(true));
        }
        if let Some(effort) = &self.reasoning_effort {
            extra_params.insert("reasoning_effort".to_string(), serde_json::json!(effort));
        }

        let response_format = self.json_schema.as_ref().map(|schema| ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: Some(schema.clone()),
            response_type: None,
        });

        ChatDefaults {
            model: self.require_model(default_model),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            system_prompt: self.system_prompt.clone(),
            tools: self.tools.clone(),
            tool_choice: self.tool_choice.clone(),
            response_format,
            extra_params,
        }
    }

    async fn openai_handle(&self) -> Result<ChatHandle<OpenAIProvider>> {
        let mut config = OpenAIConfig::default();
        if let Some(key) = &self.api_key {
            config.base.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.base.api_base = Some(url.clone());
        }
        self.apply_http(&mut config.base.timeout, &mut config.base.max_retries, &mut config.base.headers);
        let provider = OpenAIProvider::new(config)
            .await
            .map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("gpt-4o-mini");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn anthropic_handle(&self) -> Result<ChatHandle<AnthropicProvider>> {
        let mut config = self
            .api_key
            .clone()
            .map(AnthropicConfig::new)
            .unwrap_or_default();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        config.proxy_url = self.http.proxy.clone();
        config.custom_headers.extend(self.http.headers.clone());
        if let Some(timeout) = self.http.timeout {
            config.request_timeout = timeout.as_secs();
        }
        if let Some(timeout) = self.http.connect_timeout {
            config.connect_timeout = timeout.as_secs();
        }
        let provider = AnthropicProvider::new(config).map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("claude-3-5-sonnet-20241022");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn gemini_handle(&self) -> Result<ChatHandle<GeminiProvider>> {
        let mut config = self
            .api_key
            .clone()
            .map(GeminiConfig::new_google_ai)
            .unwrap_or_default();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        config.proxy_url = self.http.proxy.clone();
        config.custom_headers.extend(self.http.headers.clone());
        if let Some(timeout) = self.http.timeout {
            config.request_timeout = timeout.as_secs();
        }
        if let Some(timeout) = self.http.connect_timeout {
            config.connect_timeout = timeout.as_secs();
        }
        let provider = GeminiProvider::new(config).map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("gemini-1.5-flash");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn deepseek_handle(&self) -> Result<ChatHandle<DeepSeekProvider>> {
        let mut config = DeepSeekConfig::new("deepseek");
        if let Some(key) = &self.api_key {
            config.base.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.base.api_base = Some(url.clone());
        }
        self.apply_http(&mut config.base.timeout, &mut config.base.max_retries, &mut config.base.headers);
        let provider = DeepSeekProvider::new(config).map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("deepseek-chat");
        Ok(ChatHandle::new(provider, defaults))
    }

    async fn groq_handle(&self) -> Result<ChatHandle<GroqProvider>> {
        let mut config = GroqConfig::default();
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.api_base = Some(url.clone());
        }
        if let Some(timeout) = self.http.timeout {
            config.timeout = timeout.as_secs();
        }
        let provider = GroqProvider::new(config).await.map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("llama-3.3-70b-versatile");
        Ok(ChatHandle::new(provider, defaults))
    }

    async fn xai_handle(&self) -> Result<ChatHandle<XAIProvider>> {
        let mut config = XAIConfig::default();
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.api_base = Some(url.clone());
        }
        if let Some(timeout) = self.http.timeout {
            config.timeout = timeout.as_secs();
        }
        let provider = XAIProvider::new(config).await.map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("grok-beta");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn ollama_handle(&self) -> Result<ChatHandle<OllamaProvider>> {
        let mut config = OllamaConfig::default();
        if let Some(key) = &self.api_key {
            config.inner.base.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.inner.base.api_base = Some(url.clone());
        }
        self.apply_http(
            &mut config.inner.base.timeout,
            &mut config.inner.base.max_retries,
            &mut config.inner.base.headers,
        );
        let provider = OllamaProvider::new(config).map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("llama3");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn phind_handle(&self) -> Result<ChatHandle<PhindProvider>> {
        let mut config = PhindConfig::default();
        if let Some(key) = &self.api_key {
            config.inner.base.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.inner.base.api_base = Some(url.clone());
        }
        self.apply_http(
            &mut config.inner.base.timeout,
            &mut config.inner.base.max_retries,
            &mut config.inner.base.headers,
        );
        let provider = PhindProvider::new(config).map_err(GatewayError::from)?;
        let defaults = self.chat_defaults("phind-70b");
        Ok(ChatHandle::new(provider, defaults))
    }

    fn elevenlabs_provider(&self) -> Result<ElevenLabsProvider> {
        let mut config = self
            .api_key
            .clone()
            .map(ElevenLabsConfig::new)
            .unwrap_or_default();
        if let Some(url) = &self.base_url {
            config.base.api_base = Some(url.clone());
        }
        ElevenLabsProvider::new(config)
    }

    /// Build a handle exposing the `Chat` capability.
    ///
    /// Fails with `UnsupportedCapability` for ElevenLabs, which never
    /// implements `Chat` — it's TTS-only, see `build_tts`.
    pub async fn build(self) -> Result<Arc<dyn Chat>> {
        let provider = self.require_provider()?;

        match provider {
            ProviderId::OpenAI => Ok(Arc::new(self.openai_handle().await?)),
            ProviderId::Anthropic => Ok(Arc::new(self.anthropic_handle()?)),
            ProviderId::Gemini => Ok(Arc::new(self.gemini_handle()?)),
            ProviderId::DeepSeek => Ok(Arc::new(self.deepseek_handle()?)),
            ProviderId::Groq => Ok(Arc::new(self.groq_handle().await?)),
            ProviderId::XAI => Ok(Arc::new(self.xai_handle().await?)),
            ProviderId::Ollama => Ok(Arc::new(self.ollama_handle()?)),
            ProviderId::Phind => Ok(Arc::new(self.phind_handle()?)),
            ProviderId::ElevenLabs => Err(GatewayError::unsupported_capability(format!(
                "chat on {}",
                provider.name()
            ))),
        }
    }

    /// Build a handle exposing the `StreamingChat` capability.
    ///
    /// Only OpenAI, DeepSeek, Groq, Ollama and Phind genuinely stream today
    /// (xAI's own streaming call is still a stub that always errors, so it's
    /// excluded here rather than handed to a caller as if it worked).
    pub async fn build_streaming(self) -> Result<Arc<dyn StreamingChat>> {
        let provider = self.require_provider()?;

        match provider {
            ProviderId::OpenAI => Ok(Arc::new(self.openai_handle().await?)),
            ProviderId::DeepSeek => Ok(Arc::new(self.deepseek_handle()?)),
            ProviderId::Groq => Ok(Arc::new(self.groq_handle().await?)),
            ProviderId::Ollama => Ok(Arc::new(self.ollama_handle()?)),
            ProviderId::Phind => Ok(Arc::new(self.phind_handle()?)),
            _ => Err(GatewayError::unsupported_capability(format!(
                "streaming chat on {}",
                provider.name()
            ))),
        }
    }

    /// Build a handle exposing the `Tts` capability. Only ElevenLabs
    /// implements it today.
    pub async fn build_tts(self) -> Result<Arc<dyn Tts>> {
        let provider = self.require_provider()?;

        match provider {
            ProviderId::ElevenLabs => Ok(Arc::new(self.elevenlabs_provider()?)),
            _ => Err(GatewayError::unsupported_capability(format!(
                "tts on {}",
                provider.name()
            ))),
        }
    }

    /// Build a handle exposing the `Embedding` capability.
    ///
    /// Only OpenAI's embeddings endpoint is genuinely functional among the
    /// wired providers today (DeepSeek has no embeddings endpoint, Groq and
    /// xAI both always error on theirs).
    pub async fn build_embedding(self) -> Result<Arc<dyn Embedding>> {
        let provider = self.require_provider()?;

        match provider {
            ProviderId::OpenAI => Ok(Arc::new(self.openai_handle().await?)),
            _ => Err(GatewayError::unsupported_capability(format!(
                "embedding on {}",
                provider.name()
            ))),
        }
    }

    fn apply_http(&self, timeout: &mut u64, max_retries: &mut u32, headers: &mut HashMap<String, String>) {
        if let Some(t) = self.http.timeout {
            *timeout = t.as_secs();
        }
        let _ = max_retries;
        headers.extend(self.http.headers.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_defaults_carries_json_schema_into_response_format() {
        let builder = Builder::new()
            .openai()
            .model("gpt-4o")
            .json_schema(serde_json::json!({"type": "object"}));
        let defaults = builder.chat_defaults("gpt-4o-mini");
        assert_eq!(defaults.model, "gpt-4o");
        let format = defaults.response_format.expect("response_format set");
        assert_eq!(format.format_type, "json_schema");
    }

    #[test]
    fn top_k_and_reasoning_effort_flow_through_extra_params() {
        let builder = Builder::new()
            .anthropic()
            .top_k(40)
            .reasoning_effort("high");
        let defaults = builder.chat_defaults("claude-3-5-sonnet-20241022");
        assert_eq!(defaults.extra_params.get("top_k"), Some(&serde_json::json!(40)));
        assert_eq!(
            defaults.extra_params.get("reasoning_effort"),
            Some(&serde_json::json!("high"))
        );
    }

    #[tokio::test]
    async fn build_without_provider_is_invalid_request() {
        let result = Builder::new().build().await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn build_unsupported_provider_reports_capability() {
        let result = Builder::new().provider(ProviderId::ElevenLabs).build().await;
        assert!(matches!(result, Err(GatewayError::UnsupportedCapability(_))));
    }

    #[tokio::test]
    async fn build_streaming_rejects_non_streaming_provider() {
        let result = Builder::new().anthropic().build_streaming().await;
        assert!(matches!(result, Err(GatewayError::UnsupportedCapability(_))));
    }

    #[tokio::test]
    async fn build_embedding_rejects_non_embedding_provider() {
        let result = Builder::new().groq().build_embedding().await;
        assert!(matches!(result, Err(GatewayError::UnsupportedCapability(_))));
    }
}
