//! Phind configuration

use crate::core::providers::openai_compat::OpenAiCompatConfig;

pub const PHIND_DEFAULT_BASE: &str = "https://https.extension.phind.com/agent/v1";

#[derive(Debug, Clone)]
pub struct PhindConfig {
    pub inner: OpenAiCompatConfig,
}

impl Default for PhindConfig {
    fn default() -> Self {
        Self {
            inner: OpenAiCompatConfig::new(PHIND_DEFAULT_BASE),
        }
    }
}

impl PhindConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            inner: OpenAiCompatConfig::new(api_base),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.inner = self.inner.with_api_key(api_key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_is_phind() {
        assert_eq!(PhindConfig::default().inner.get_api_base(), PHIND_DEFAULT_BASE);
    }
}
