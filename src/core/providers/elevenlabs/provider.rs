//! ElevenLabs provider implementation
//!
//! Implements `Tts` directly against ElevenLabs' own wire format
//! (`xi-api-key` header, `voice_settings` body, raw audio bytes back) rather
//! than going through the OpenAI-compatible adapter, since ElevenLabs' API
//! has no chat-completions shape to reuse.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;

use crate::core::providers::base::{GlobalPoolManager, header};
use crate::core::traits::provider::{Tts, TtsRequest, TtsResponse, TtsStreamEvent};
use crate::utils::error::{GatewayError, Result};

use super::config::{ELEVENLABS_DEFAULT_MODEL, ElevenLabsConfig};

#[derive(Debug, Clone)]
pub struct ElevenLabsProvider {
    config: ElevenLabsConfig,
    pool_manager: Arc<GlobalPoolManager>,
}

impl ElevenLabsProvider {
    pub fn new(config: ElevenLabsConfig) -> Result<Self> {
        config.validate().map_err(GatewayError::invalid_request)?;

        let pool_manager = Arc::new(GlobalPoolManager::new().map_err(|e| {
            GatewayError::generic(format!("failed to build elevenlabs client: {e}"))
        })?);

        Ok(Self {
            config,
            pool_manager,
        })
    }

    fn resolve_voice_id(&self, request: &TtsRequest) -> Result<String> {
        request
            .voice
            .clone()
            .or_else(|| self.config.default_voice_id.clone())
            .ok_or_else(|| {
                GatewayError::invalid_request(
                    "elevenlabs requires a voice id, either on the request or as default_voice_id",
                )
            })
    }

    fn build_body(&self, request: &TtsRequest) -> serde_json::Value {
        let model_id = request
            .model
            .clone()
            .unwrap_or_else(|| ELEVENLABS_DEFAULT_MODEL.to_string());

        let mut body = serde_json::json!({
            "text": request.text,
            "model_id": model_id,
        });

        if let Some(speed) = request.speed {
            body["voice_settings"] = serde_json::json!({ "speed": speed });
        }

        body
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .base
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::invalid_request("elevenlabs api_key is not set"))
    }
}

#[async_trait]
impl Tts for ElevenLabsProvider {
    async fn tts(&self, request: TtsRequest) -> Result<TtsResponse> {
        let voice_id = self.resolve_voice_id(&request)?;
        let body = self.build_body(&request);
        let url = format!(
            "{}/text-to-speech/{}",
            self.config.get_api_base(),
            voice_id
        );

        let headers = vec![header("xi-api-key", self.api_key()?.to_string())];

        let response = self
            .pool_manager
            .execute_request(
                &url,
                crate::core::providers::base::HttpMethod::POST,
                headers,
                Some(body),
            )
            .await
            .map_err(|e| GatewayError::provider(format!("elevenlabs: {e}")))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::provider(format!("elevenlabs: {e}")))?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&bytes).to_string();
            return Err(GatewayError::provider(format!(
                "elevenlabs HTTP {status}: {message}"
            )));
        }

        Ok(TtsResponse {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    async fn tts_stream(
        &self,
        request: TtsRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<TtsStreamEvent>> + Send>>> {
        let voice_id = self.resolve_voice_id(&request)?;
        let body = self.build_body(&request);
        let url = format!(
            "{}/text-to-speech/{}/stream",
            self.config.get_api_base(),
            voice_id
        );

        let client = self.pool_manager.client().clone();
        let api_key = self.api_key()?.to_string();

        let response = client
            .post(&url)
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::provider(format!("elevenlabs: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::provider(format!(
                "elevenlabs HTTP {status}: {message}"
            )));
        }

        let byte_stream = response.bytes_stream();
        let events = byte_stream.map(|chunk| match chunk {
            Ok(bytes) => Ok(TtsStreamEvent::AudioData {
                bytes: bytes.to_vec(),
                is_final: false,
            }),
            Err(e) => Ok(TtsStreamEvent::Error(e.to_string())),
        });

        Ok(Box::pin(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_voice_id_prefers_request() {
        let config = ElevenLabsConfig::new("xi-test-key").with_default_voice("default-voice");
        let provider = ElevenLabsProvider::new(config).unwrap();

        let request = TtsRequest {
            text: "hello".to_string(),
            voice: Some("explicit-voice".to_string()),
            model: None,
            format: None,
            speed: None,
        };

        assert_eq!(
            provider.resolve_voice_id(&request).unwrap(),
            "explicit-voice"
        );
    }

    #[test]
    fn resolve_voice_id_falls_back_to_default() {
        let config = ElevenLabsConfig::new("xi-test-key").with_default_voice("default-voice");
        let provider = ElevenLabsProvider::new(config).unwrap();

        let request = TtsRequest {
            text: "hello".to_string(),
            voice: None,
            model: None,
            format: None,
            speed: None,
        };

        assert_eq!(provider.resolve_voice_id(&request).unwrap(), "default-voice");
    }

    #[test]
    fn missing_voice_id_is_an_error() {
        let config = ElevenLabsConfig::new("xi-test-key");
        let provider = ElevenLabsProvider::new(config).unwrap();

        let request = TtsRequest {
            text: "hello".to_string(),
            voice: None,
            model: None,
            format: None,
            speed: None,
        };

        assert!(provider.resolve_voice_id(&request).is_err());
    }
}
