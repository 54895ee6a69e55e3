//! # litechat-rs
//!
//! A unified Rust client for multiple LLM providers (OpenAI, Anthropic,
//! Gemini, DeepSeek, Groq, xAI, Ollama, Phind, ElevenLabs) behind one
//! capability-oriented surface.
//!
//! There is no server, router, or registry: a [`Builder`] binds to exactly
//! one provider and returns a handle implementing whichever capability
//! traits ([`Chat`], [`StreamingChat`], [`Embedding`], ...) that provider
//! supports.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use litechat_rs::{Builder, ChatMessage, MessageRole, ProviderId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chat = Builder::new()
//!         .provider(ProviderId::OpenAI)
//!         .api_key("sk-...")
//!         .model("gpt-4o-mini")
//!         .build()
//!         .await?;
//!
//!     let message = ChatMessage {
//!         role: MessageRole::User,
//!         content: Some("Hello, how are you?".into()),
//!         ..Default::default()
//!     };
//!     let response = chat.chat(vec![message]).await?;
//!     println!("{:?}", response.first_content());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

pub use config::{Builder, HttpBuilder, ProviderId};
pub use utils::error::{GatewayError, Result};

pub use core::traits::provider::{
    AssistantInfo, AssistantSpec, Assistants, Capability, Chat, Embedding, FileInfo,
    FileManagement, GeneratedImage, ImageGenRequest, ImageGenResponse, ImageGeneration,
    Moderation, ModerationResult, ProviderCapabilities, Stt, SttRequest, SttResponse,
    StreamingChat, Tts, TtsRequest, TtsResponse, TtsStreamEvent, WordTiming,
};

pub use core::batch::{
    AsyncBatchConfig, AsyncBatchExecutor, AsyncBatchItemResult, AsyncBatchProgress,
    AsyncBatchSummary, batch_execute,
};

pub use core::types::{
    ChatMessage, ChatRequest, ChatResponse, MessageContent, MessageRole, RequestContext,
    ResponseFormat, StreamEvent, Tool, ToolChoice,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, env!("CARGO_PKG_NAME"));
        assert_eq!(DESCRIPTION, env!("CARGO_PKG_DESCRIPTION"));
    }
}
