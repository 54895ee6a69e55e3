//! Provider implementations
//!
//! Each submodule implements one backend (OpenAI, Anthropic, Gemini,
//! DeepSeek, Groq, xAI, ...) against the capability traits in
//! `core::traits::provider`. There is no provider registry or enum dispatch
//! here: a caller constructs exactly one provider via the builder and talks
//! to it through whichever capability traits it implements.

pub mod base;

pub mod anthropic;
pub mod deepseek;
pub mod elevenlabs;
pub mod gemini;
pub mod groq;
pub mod ollama;
pub mod openai;
pub mod openai_compat;
pub mod phind;
pub mod xai;

pub mod base_provider;
pub mod thinking;
pub mod unified_provider;

pub use unified_provider::{ProviderError, UnifiedProviderError};
