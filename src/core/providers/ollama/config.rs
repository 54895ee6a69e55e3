//! Ollama configuration

use crate::core::providers::openai_compat::OpenAiCompatConfig;

pub const OLLAMA_DEFAULT_BASE: &str = "http://localhost:11434/v1";

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub inner: OpenAiCompatConfig,
    /// How long the server should keep the model loaded after this request
    /// (Ollama's `keep_alive` parameter, e.g. "5m"). `None` uses the
    /// server's own default.
    pub keep_alive: Option<String>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            inner: OpenAiCompatConfig::new(OLLAMA_DEFAULT_BASE),
            keep_alive: None,
        }
    }
}

impl OllamaConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            inner: OpenAiCompatConfig::new(api_base),
            ..Default::default()
        }
    }

    pub fn with_keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_is_localhost() {
        assert_eq!(OllamaConfig::default().inner.get_api_base(), OLLAMA_DEFAULT_BASE);
    }
}
