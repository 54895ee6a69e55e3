//! ElevenLabs provider
//!
//! ElevenLabs is text-to-speech only: unlike the chat providers it never
//! goes through `ChatHandle`/`RawChat`. Its provider struct implements
//! `core::traits::provider::Tts` directly.

pub mod config;
pub mod provider;

pub use config::ElevenLabsConfig;
pub use provider::ElevenLabsProvider;
