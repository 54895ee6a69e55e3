//! ElevenLabs configuration

use crate::core::providers::base::BaseConfig;

pub const ELEVENLABS_DEFAULT_BASE: &str = "https://api.elevenlabs.io/v1";
pub const ELEVENLABS_DEFAULT_MODEL: &str = "eleven_multilingual_v2";

#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub base: BaseConfig,
    /// Default voice id used when a `TtsRequest` doesn't specify one.
    pub default_voice_id: Option<String>,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                api_base: Some(ELEVENLABS_DEFAULT_BASE.to_string()),
                ..BaseConfig::default()
            },
            default_voice_id: None,
        }
    }
}

impl ElevenLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base: BaseConfig {
                api_key: Some(api_key.into()),
                api_base: Some(ELEVENLABS_DEFAULT_BASE.to_string()),
                ..BaseConfig::default()
            },
            default_voice_id: None,
        }
    }

    pub fn with_default_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.default_voice_id = Some(voice_id.into());
        self
    }

    pub fn get_api_base(&self) -> String {
        self.base
            .api_base
            .clone()
            .unwrap_or_else(|| ELEVENLABS_DEFAULT_BASE.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.api_key.as_ref().is_none_or(|k| k.is_empty()) {
            return Err("ElevenLabs requires an api_key".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        assert!(ElevenLabsConfig::default().validate().is_err());
        assert!(ElevenLabsConfig::new("xi-test-key").validate().is_ok());
    }
}
