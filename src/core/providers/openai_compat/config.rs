//! Configuration for OpenAI-wire-compatible backends (Ollama, Phind)

use std::time::Duration;

use crate::core::providers::base::BaseConfig;
use crate::core::traits::provider::ProviderConfig as ProviderConfigTrait;

/// Configuration for a provider that speaks the OpenAI chat-completions wire
/// format but isn't OpenAI itself. Unlike `OpenAIConfig`, an API key is
/// optional (Ollama typically runs unauthenticated on localhost).
#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    pub base: BaseConfig,
}

impl OpenAiCompatConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            base: BaseConfig {
                api_base: Some(api_base.into()),
                ..BaseConfig::default()
            },
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.base.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.base.timeout = timeout_secs;
        self
    }

    pub fn get_api_base(&self) -> String {
        self.base.api_base.clone().unwrap_or_default()
    }
}

impl ProviderConfigTrait for OpenAiCompatConfig {
    fn validate(&self) -> Result<(), String> {
        if self
            .base
            .api_base
            .as_ref()
            .is_none_or(|base| base.is_empty())
        {
            return Err("api_base is required".to_string());
        }
        Ok(())
    }

    fn api_key(&self) -> Option<&str> {
        self.base.api_key.as_deref()
    }

    fn api_base(&self) -> Option<&str> {
        self.base.api_base.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.base.timeout)
    }

    fn max_retries(&self) -> u32 {
        self.base.max_retries
    }
}
