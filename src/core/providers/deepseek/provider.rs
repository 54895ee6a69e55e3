//! DeepSeek Provider Implementation
//!
//! Main provider implementation using the unified base infrastructure

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use crate::core::providers::base::{header, header_owned, GlobalPoolManager, HeaderPair, HttpMethod, get_pricing_db};
use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::ProviderConfig;
use crate::core::types::{
    common::{HealthStatus, ModelInfo, ProviderCapability, RequestContext},
    requests::ChatRequest,
    responses::{ChatChunk, ChatResponse},
};

use super::{DeepSeekClient, DeepSeekConfig, DeepSeekErrorMapper};

#[derive(Debug, Clone)]
pub struct DeepSeekProvider {
    config: DeepSeekConfig,
    pool_manager: Arc<GlobalPoolManager>,
    supported_models: Vec<ModelInfo>,
}

impl DeepSeekProvider {
    /// Generate headers for DeepSeek API requests
    fn get_request_headers(&self) -> Vec<HeaderPair> {
        let mut headers = Vec::with_capacity(2);

        if let Some(api_key) = &self.config.base.api_key {
            headers.push(header("Authorization", format!("Bearer {}", api_key)));
        }

        // Add custom headers
        for (key, value) in &self.config.base.headers {
            headers.push(header_owned(key.clone(), value.clone()));
        }

        headers
    }

    pub fn new(config: DeepSeekConfig) -> Result<Self, ProviderError> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration("deepseek", e))?;

        let pool_manager = Arc::new(
            GlobalPoolManager::new()
                .map_err(|e| ProviderError::configuration("deepseek", e.to_string()))?,
        );
        let supported_models = DeepSeekClient::supported_models();

        Ok(Self {
            config,
            pool_manager,
            supported_models,
        })
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        let config = DeepSeekConfig::from_env();
        Self::new(config)
    }
}

impl DeepSeekProvider {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    fn capabilities(&self) -> &'static [ProviderCapability] {
        &[
            ProviderCapability::ChatCompletion,
            ProviderCapability::ChatCompletionStream,
            ProviderCapability::ToolCalling,
        ]
    }

    fn models(&self) -> &[ModelInfo] {
        &self.supported_models
    }

    fn get_supported_openai_params(&self, _model: &str) -> &'static [&'static str] {
        DeepSeekClient::supported_openai_params()
    }

    async fn map_openai_params(
        &self,
        params: HashMap<String, Value>,
        _model: &str,
    ) -> Result<HashMap<String, Value>, ProviderError> {
        Ok(params)
    }

    async fn transform_request(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<Value, ProviderError> {
        Ok(DeepSeekClient::transform_chat_request(request))
    }

    async fn transform_response(
        &self,
        raw_response: &[u8],
        _model: &str,
        _request_id: &str,
    ) -> Result<ChatResponse, ProviderError> {
        let response: Value = serde_json::from_slice(raw_response)
            .map_err(|e| ProviderError::response_parsing("deepseek", e.to_string()))?;
        DeepSeekClient::transform_chat_response(response)
    }

    fn get_error_mapper(&self) -> ProviderErrorMapper {
        DeepSeekErrorMapper
    }

    async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base.get_effective_api_base("deepseek")
        );
        let body = DeepSeekClient::transform_chat_request(request.clone());

        let headers = self.get_request_headers();
        let body_data = Some(body);

        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, headers, body_data)
            .await?;

        let response_bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::network("deepseek", e.to_string()))?;

        self.transform_response(&response_bytes, &request.model, &context.request_id)
            .await
    }

    async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatChunk, ProviderError>> + Send>>, ProviderError>
    {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base.get_effective_api_base("deepseek")
        );

        // Create
        let mut body = DeepSeekClient::transform_chat_request(request.clone());
        body["stream"] = serde_json::Value::Bool(true);

        // Get
        let api_key = self
            .config
            .base
            .get_effective_api_key("deepseek")
            .ok_or_else(|| ProviderError::authentication("deepseek", "API key is required"))?;

        // Create
        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network("deepseek", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::api_error(
                "deepseek",
                status.as_u16(),
                error_text,
            ));
        }

        // Create DeepSeek stream using unified SSE parser
        let stream = response.bytes_stream();
        Ok(Box::pin(super::streaming::create_deepseek_stream(stream)))
    }

    async fn health_check(&self) -> HealthStatus {
        if self.config.base.get_effective_api_key("deepseek").is_some() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }

    async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, ProviderError> {
        let usage = crate::core::providers::base::pricing::Usage {
            prompt_tokens: input_tokens,
            completion_tokens: output_tokens,
            total_tokens: input_tokens + output_tokens,
            reasoning_tokens: None,
        };

        Ok(get_pricing_db().calculate(model, &usage))
    }
}

#[async_trait]
impl crate::core::providers::base::RawChat for DeepSeekProvider {
    type Error = ProviderError;

    async fn raw_chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, ProviderError> {
        self.chat_completion(request, context).await
    }

    fn capabilities(&self) -> Vec<crate::core::traits::provider::Capability> {
        use crate::core::traits::provider::Capability;
        vec![
            Capability::Chat,
            Capability::StreamingChat,
            Capability::ToolCalling,
            Capability::Reasoning,
        ]
    }
}

#[async_trait]
impl crate::core::providers::base::RawChatStream for DeepSeekProvider {
    type Error = ProviderError;

    async fn raw_chat_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatChunk, ProviderError>> + Send>>, ProviderError>
    {
        self.chat_completion_stream(request, context).await
    }
}
