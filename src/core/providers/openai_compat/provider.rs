//! Generalized adapter for providers that speak the OpenAI chat-completions
//! wire format but aren't OpenAI itself (Ollama, Phind).
//!
//! Reuses the OpenAI provider's response transformer and streaming parser;
//! callers customize the request body and headers via the two optional
//! hook closures instead of reimplementing response handling.

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;

use crate::core::providers::base::{GlobalPoolManager, HeaderPair, HttpMethod, header};
use crate::core::providers::openai::streaming::create_openai_stream;
use crate::core::providers::openai::transformer::OpenAIResponseTransformer;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{
    common::RequestContext,
    requests::ChatRequest,
    responses::{ChatChunk, ChatResponse},
};

use super::config::OpenAiCompatConfig;

type RequestBodyTransformer = Arc<dyn Fn(Value) -> Value + Send + Sync>;
type HeadersTransformer = Arc<dyn Fn(Vec<HeaderPair>) -> Vec<HeaderPair> + Send + Sync>;

/// Adapter over the OpenAI chat-completions wire format.
///
/// `provider_name` tags errors and is used by `HttpErrorMapper`-style
/// callers; `request_body_transformer` and `headers_transformer` let each
/// concrete provider (Ollama, Phind) adjust the outgoing request without
/// touching response parsing.
#[derive(Clone)]
pub struct OpenAiCompatProvider {
    provider_name: &'static str,
    config: OpenAiCompatConfig,
    pool_manager: Arc<GlobalPoolManager>,
    request_body_transformer: Option<RequestBodyTransformer>,
    headers_transformer: Option<HeadersTransformer>,
}

impl std::fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("provider_name", &self.provider_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatProvider {
    pub fn new(
        provider_name: &'static str,
        config: OpenAiCompatConfig,
    ) -> Result<Self, ProviderError> {
        use crate::core::traits::provider::ProviderConfig;
        config
            .validate()
            .map_err(|e| ProviderError::configuration(provider_name, e))?;

        Ok(Self {
            provider_name,
            config,
            pool_manager: Arc::new(GlobalPoolManager::new()?),
            request_body_transformer: None,
            headers_transformer: None,
        })
    }

    pub fn with_request_body_transformer(
        mut self,
        f: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.request_body_transformer = Some(Arc::new(f));
        self
    }

    pub fn with_headers_transformer(
        mut self,
        f: impl Fn(Vec<HeaderPair>) -> Vec<HeaderPair> + Send + Sync + 'static,
    ) -> Self {
        self.headers_transformer = Some(Arc::new(f));
        self
    }

    fn build_headers(&self) -> Vec<HeaderPair> {
        let mut headers = Vec::with_capacity(2);
        if let Some(api_key) = &self.config.base.api_key {
            headers.push(header("Authorization", format!("Bearer {}", api_key)));
        }
        if let Some(transform) = &self.headers_transformer {
            headers = transform(headers);
        }
        headers
    }

    fn build_request_body(&self, request: ChatRequest, stream: bool) -> Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "stream": stream,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }
        if let Some(tools) = &request.tools {
            body["tools"] = serde_json::json!(tools);
        }
        if let Some(tool_choice) = &request.tool_choice {
            body["tool_choice"] = serde_json::json!(tool_choice);
        }
        if let Some(stop) = &request.stop {
            body["stop"] = serde_json::json!(stop);
        }

        if let Some(transform) = &self.request_body_transformer {
            body = transform(body);
        }

        body
    }

    async fn execute_chat_completion(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, ProviderError> {
        let body = self.build_request_body(request, false);
        let url = format!("{}/chat/completions", self.config.get_api_base());
        let headers = self.build_headers();

        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, headers, Some(body))
            .await?;

        let status = response.status();
        let response_bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::network(self.provider_name, e.to_string()))?;

        if !status.is_success() {
            let body_text = String::from_utf8_lossy(&response_bytes).to_string();
            return Err(
                crate::core::providers::base_provider::HttpErrorMapper::map_status_code(
                    self.provider_name,
                    status.as_u16(),
                    &body_text,
                ),
            );
        }

        let response_json: Value = serde_json::from_slice(&response_bytes).map_err(|e| {
            ProviderError::response_parsing(self.provider_name, e.to_string())
        })?;

        let openai_response: crate::core::providers::openai::models::OpenAIChatResponse =
            serde_json::from_value(response_json)
                .map_err(|e| ProviderError::response_parsing(self.provider_name, e.to_string()))?;

        OpenAIResponseTransformer::transform(openai_response)
            .map_err(|e| ProviderError::response_parsing(self.provider_name, e.to_string()))
    }

    async fn execute_chat_completion_stream(
        &self,
        request: ChatRequest,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ChatChunk, ProviderError>> + Send>>,
        ProviderError,
    > {
        let body = self.build_request_body(request, true);
        let url = format!("{}/chat/completions", self.config.get_api_base());
        let headers = self.build_headers();

        let client = reqwest::Client::new();
        let mut req = client.post(&url).json(&body);
        for (key, value) in headers {
            req = req.header(key, value);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ProviderError::network(self.provider_name, e.to_string()))?;

        let stream = response.bytes_stream();
        let openai_stream = create_openai_stream(stream);
        Ok(Box::pin(futures::StreamExt::map(openai_stream, |item| {
            item.map_err(|e| ProviderError::response_parsing("openai_compat", e.to_string()))
        })))
    }
}

#[async_trait]
impl crate::core::providers::base::RawChat for OpenAiCompatProvider {
    type Error = ProviderError;

    async fn raw_chat_completion(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<ChatResponse, ProviderError> {
        self.execute_chat_completion(request).await
    }

    fn capabilities(&self) -> Vec<crate::core::traits::provider::Capability> {
        use crate::core::traits::provider::Capability;
        vec![Capability::Chat, Capability::StreamingChat]
    }
}

#[async_trait]
impl crate::core::providers::base::RawChatStream for OpenAiCompatProvider {
    type Error = ProviderError;

    async fn raw_chat_stream(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ChatChunk, ProviderError>> + Send>>,
        ProviderError,
    > {
        self.execute_chat_completion_stream(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_transformer_applies() {
        let config = OpenAiCompatConfig::new("http://localhost:11434/v1");
        let provider = OpenAiCompatProvider::new("ollama", config)
            .unwrap()
            .with_request_body_transformer(|mut body| {
                body["keep_alive"] = serde_json::json!("5m");
                body
            });

        let request = ChatRequest {
            model: "llama3".to_string(),
            messages: vec![],
            ..Default::default()
        };

        let body = provider.build_request_body(request, false);
        assert_eq!(body["keep_alive"], serde_json::json!("5m"));
    }

    #[test]
    fn headers_transformer_applies() {
        let config = OpenAiCompatConfig::new("https://phind.example/v1");
        let provider = OpenAiCompatProvider::new("phind", config)
            .unwrap()
            .with_headers_transformer(|mut headers| {
                headers.push(header("X-Phind-Client", "litechat".to_string()));
                headers
            });

        let headers = provider.build_headers();
        assert!(headers.iter().any(|(k, _)| k == "X-Phind-Client"));
    }
}
