//! Phind provider implementation
//!
//! Thin wrapper over `OpenAiCompatProvider` that strips `tools`/`tool_choice`
//! from the outgoing request body, since Phind's wire format has no concept
//! of tool calls.

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

use super::config::PhindConfig;

#[derive(Debug, Clone)]
pub struct PhindProvider {
    inner: OpenAiCompatProvider,
}

impl PhindProvider {
    pub fn new(config: PhindConfig) -> Result<Self, ProviderError> {
        let inner = OpenAiCompatProvider::new("phind", config.inner).map(|p| {
            p.with_request_body_transformer(|mut body| {
                if let Some(obj) = body.as_object_mut() {
                    obj.remove("tools");
                    obj.remove("tool_choice");
                }
                body
            })
        })?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl crate::core::providers::base::RawChat for PhindProvider {
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
impl crate::core::providers::base::RawChatStream for PhindProvider {
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
