//! Ollama provider implementation
//!
//! Thin wrapper over `OpenAiCompatProvider`: Ollama's wire format is
//! OpenAI-compatible, so all request/response handling is reused as-is. The
//! only customization is injecting `keep_alive` into the request body.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::core::providers::base::{RawChat, RawChatStream};
use crate::core::providers::openai_compat::OpenAiCompatProvider;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{
    common::RequestContext,
    requests::ChatRequest,
    responses::{ChatChunk, ChatResponse},
};

use super::config::OllamaConfig;

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    inner: OpenAiCompatProvider,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self, ProviderError> {
        let keep_alive = config.keep_alive.clone();
        let mut inner = OpenAiCompatProvider::new("ollama", config.inner)?;

        if let Some(keep_alive) = keep_alive {
            inner = inner.with_request_body_transformer(move |mut body| {
                body["keep_alive"] = serde_json::json!(keep_alive);
                body
            });
        }

        Ok(Self { inner })
    }

    pub fn local() -> Result<Self, ProviderError> {
        Self::new(OllamaConfig::default())
    }
}

#[async_trait]
impl crate::core::providers::base::RawChat for OllamaProvider {
    type Error = ProviderError;

    async fn raw_chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, ProviderError> {
        self.inner.raw_chat_completion(request, context).await
    }

    fn capabilities(&self) -> Vec<crate::core::traits::provider::Capability> {
        use crate::core::traits::provider::Capability;
        vec![Capability::Chat, Capability::StreamingChat]
    }
}

#[async_trait]
impl crate::core::providers::base::RawChatStream for OllamaProvider {
    type Error = ProviderError;

    async fn raw_chat_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ChatChunk, ProviderError>> + Send>>,
        ProviderError,
    > {
        self.inner.raw_chat_stream(request, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_provider_builds() {
        assert!(OllamaProvider::local().is_ok());
    }
}
