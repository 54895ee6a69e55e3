//! Generic capability adapter binding a provider's own chat method to the
//! unified `Chat`/`ProviderCapabilities` traits
//!
//! Every provider facade (`OpenAIProvider`, `AnthropicProvider`, ...) keeps an
//! inherent `chat_completion` method returning its own error type. `RawChat`
//! is the narrow seam each provider implements to expose that method to
//! `ChatHandle`, which does the one-time work of turning builder-captured
//! defaults plus a message list into a `ChatRequest`, and a provider error
//! into a `GatewayError` via that provider's own `Into<GatewayError>` impl.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::providers::thinking::reasoning_utils::filter_thinking_content;
use crate::core::traits::provider::{Capability, Chat, ProviderCapabilities};
use crate::core::types::{
    ChatMessage, ChatRequest, ChatResponse, RequestContext, ResponseFormat, Tool, ToolChoice,
};
use crate::utils::error::{GatewayError, Result};

/// A provider's raw chat-completion call, independent of the `Chat` trait's
/// signature (which takes no model/sampling parameters — those come from
/// `ChatDefaults` instead). `Error` converts into `GatewayError` via a
/// provider-specific `From` impl: OpenAI/Anthropic/Gemini/DeepSeek funnel
/// through the shared `ProviderError`'s conversion directly, while Groq and
/// xAI hop through `ProviderError` via their own `From<GroqError>` /
/// `From<XAIError>` impls first.
#[async_trait]
pub trait RawChat: Send + Sync {
    /// The provider's own error type
    type Error: Into<GatewayError> + Send + Sync + 'static;

    async fn raw_chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> std::result::Result<ChatResponse, Self::Error>;

    /// Capabilities this provider reports through `ChatHandle`'s
    /// `ProviderCapabilities` impl. Every provider supports `Chat`; providers
    /// that also implement `RawChatStream`/`RawEmbed` override this to add
    /// `StreamingChat`/`Embedding` (and whatever else they genuinely support).
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::Chat]
    }
}

/// Builder-captured request defaults a `ChatHandle` applies to every call.
#[derive(Debug, Clone, Default)]
pub struct ChatDefaults {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub system_prompt: Option<String>,
    pub tools: Option<Vec<Tool>>,
    pub tool_choice: Option<ToolChoice>,
    pub response_format: Option<ResponseFormat>,
    /// Fields with no dedicated `ChatRequest` slot (`top_k`, `reasoning_effort`,
    /// `thinking_budget_tokens`, ...) flow through here into `extra_params`.
    pub extra_params: HashMap<String, serde_json::Value>,
}

impl ChatDefaults {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub(crate) fn into_request(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<Vec<Tool>>,
    ) -> ChatRequest {
        let mut request = ChatRequest::new(self.model.clone());
        if let Some(system_prompt) = &self.system_prompt {
            request = request.add_system_message(system_prompt.clone());
        }
        request.messages.extend(messages);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;
        request.top_p = self.top_p;
        request.tools = tools.or_else(|| self.tools.clone());
        request.tool_choice = self.tool_choice.clone();
        request.response_format = self.response_format.clone();
        request.extra_params = self.extra_params.clone();
        request
    }
}

/// Binds one provider instance plus its captured defaults to the `Chat`
/// capability; the type built and returned by `Builder::build`.
pub struct ChatHandle<P: RawChat> {
    provider: P,
    defaults: ChatDefaults,
}

impl<P: RawChat> ChatHandle<P> {
    pub fn new(provider: P, defaults: ChatDefaults) -> Self {
        Self { provider, defaults }
    }

    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    pub(crate) fn defaults(&self) -> &ChatDefaults {
        &self.defaults
    }
}

#[async_trait]
impl<P: RawChat> Chat for ChatHandle<P> {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse> {
        let request = self.defaults.into_request(messages, None);
        self.provider
            .raw_chat_completion(request, RequestContext::default())
            .await
            .map_err(Into::into)
    }

    async fn chat_with_tools(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<Tool>,
    ) -> Result<ChatResponse> {
        let request = self.defaults.into_request(messages, Some(tools));
        self.provider
            .raw_chat_completion(request, RequestContext::default())
            .await
            .map_err(Into::into)
    }

    async fn summarize_history(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let response = self.chat(messages).await?;
        response
            .first_content()
            .map(filter_thinking_content)
            .ok_or_else(|| GatewayError::response_format("no text content in response", ""))
    }
}

impl<P: RawChat> ProviderCapabilities for ChatHandle<P> {
    fn supports(&self, cap: Capability) -> bool {
        self.provider.capabilities().contains(&cap)
    }

    fn supported_capabilities(&self) -> Vec<Capability> {
        self.provider.capabilities()
    }
}
