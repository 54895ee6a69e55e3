//! Ollama provider
//!
//! Talks to a local (or self-hosted) Ollama server through its
//! OpenAI-compatible `/v1/chat/completions` endpoint. Ollama does not
//! require authentication by default, so no API key is needed to construct
//! a provider.

mod config;
mod provider;

pub use config::OllamaConfig;
pub use provider::OllamaProvider;
