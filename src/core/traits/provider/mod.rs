//! Provider-facing trait definitions
//!
//! Split into:
//! - `config` — the `ProviderConfig` trait each provider's config type implements
//! - `capabilities` — one trait per capability (`Chat`, `StreamingChat`,
//!   `Embedding`, ...), each with default `UnsupportedCapability` bodies
//!
//! There is deliberately no provider-registry or type-erased handle here: a
//! caller builds a handle bound to one provider and uses it through whichever
//! capability traits that provider implements.

mod capabilities;
mod config;

pub use capabilities::{
    Assistants, AssistantInfo, AssistantSpec, Capability, Chat, Embedding, FileInfo,
    FileManagement, GeneratedImage, ImageGenRequest, ImageGenResponse, ImageGeneration,
    Moderation, ModerationResult, ProviderCapabilities, Stt, SttRequest, SttResponse,
    StreamingChat, Tts, TtsRequest, TtsResponse, TtsStreamEvent, WordTiming,
};
pub use config::ProviderConfig;
