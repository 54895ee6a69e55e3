//! Per-capability provider traits
//!
//! Each trait is a narrow contract over one capability (chat, embedding, tts,
//! ...). A provider implements only the traits its API actually supports;
//! every method on every trait here has a default body returning
//! `GatewayError::UnsupportedCapability` so a provider struct can pick up a
//! trait via a blanket default and still be asked about capabilities it
//! doesn't have without panicking. There is no routing layer: a caller gets
//! a handle to exactly one provider and drives it through whichever of these
//! traits it implements.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::core::types::{ChatMessage, ChatResponse, StreamEvent, Tool};
use crate::utils::error::{GatewayError, Result};

fn unsupported(capability: &str) -> GatewayError {
    GatewayError::unsupported_capability(capability.to_string())
}

/// Single-shot chat completion
#[async_trait]
pub trait Chat: Send + Sync {
    /// Send messages, get a complete response
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse>;

    /// Send messages with tool definitions attached
    async fn chat_with_tools(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<Tool>,
    ) -> Result<ChatResponse> {
        let _ = (messages, tools);
        Err(unsupported("chat_with_tools"))
    }

    /// Summarize a message history via a prompt-based call; strips any
    /// reasoning/thinking content from the returned string.
    async fn summarize_history(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let _ = messages;
        Err(unsupported("summarize_history"))
    }
}

/// Streamed chat completion
#[async_trait]
pub trait StreamingChat: Send + Sync {
    /// Stream a chat completion; tools are optional
    async fn chat_stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<Vec<Tool>>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>> {
        let _ = (messages, tools);
        Err(unsupported("chat_stream"))
    }
}

/// Text embedding
#[async_trait]
pub trait Embedding: Send + Sync {
    /// Embed a batch of strings; providers that support batching should do
    /// so in one request rather than one call per input.
    async fn embed(&self, inputs: Vec<String>) -> Result<Vec<Vec<f64>>> {
        let _ = inputs;
        Err(unsupported("embed"))
    }
}

/// Text-to-speech synthesis
#[async_trait]
pub trait Tts: Send + Sync {
    /// Synthesize speech audio for the given text
    async fn tts(&self, request: TtsRequest) -> Result<TtsResponse> {
        let _ = request;
        Err(unsupported("tts"))
    }

    /// Stream synthesized audio as it becomes available
    async fn tts_stream(
        &self,
        request: TtsRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<TtsStreamEvent>> + Send>>> {
        let _ = request;
        Err(unsupported("tts_stream"))
    }
}

/// Text-to-speech request
#[derive(Debug, Clone)]
pub struct TtsRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice identifier (provider-specific)
    pub voice: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Output audio format, e.g. `mp3`, `pcm`
    pub format: Option<String>,
    /// Playback speed multiplier
    pub speed: Option<f32>,
}

/// Text-to-speech response
#[derive(Debug, Clone)]
pub struct TtsResponse {
    /// Raw audio bytes; some providers return raw PCM rather than a
    /// containerized format. Wrapping into a container is the caller's job.
    pub bytes: Vec<u8>,
    /// MIME content type of `bytes`
    pub content_type: String,
}

/// One event of a streamed text-to-speech response
#[derive(Debug, Clone)]
pub enum TtsStreamEvent {
    /// A chunk of audio data; `is_final` marks the last chunk
    AudioData { bytes: Vec<u8>, is_final: bool },
    /// Out-of-band metadata (e.g. character timing)
    Metadata(serde_json::Value),
    /// Terminal error
    Error(String),
    /// Terminal success with no further data
    Completion,
}

/// Speech-to-text transcription
#[async_trait]
pub trait Stt: Send + Sync {
    /// Transcribe audio to text
    async fn stt(&self, request: SttRequest) -> Result<SttResponse> {
        let _ = request;
        Err(unsupported("stt"))
    }
}

/// Speech-to-text request
#[derive(Debug, Clone)]
pub struct SttRequest {
    /// Raw audio bytes, mutually exclusive with `file_path`
    pub audio_bytes: Option<Vec<u8>>,
    /// Path to an audio file on disk, mutually exclusive with `audio_bytes`
    pub file_path: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Source language hint (ISO-639-1)
    pub language: Option<String>,
    /// Request per-word timing information
    pub word_timing: bool,
}

/// Speech-to-text response
#[derive(Debug, Clone)]
pub struct SttResponse {
    /// Transcribed text
    pub text: String,
    /// Detected or requested language
    pub language: Option<String>,
    /// Per-word timing, if requested and supported
    pub words: Option<Vec<WordTiming>>,
    /// Audio duration in seconds
    pub duration: Option<f64>,
}

/// A single word's timing within a transcription
#[derive(Debug, Clone)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Image generation
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    /// Generate one or more images from a prompt
    async fn generate(&self, request: ImageGenRequest) -> Result<ImageGenResponse> {
        let _ = request;
        Err(unsupported("generate"))
    }

    /// Whether this provider supports editing an existing image
    fn supports_editing(&self) -> bool {
        false
    }

    /// Whether this provider supports generating variations of an image
    fn supports_variations(&self) -> bool {
        false
    }
}

/// Image generation request
#[derive(Debug, Clone, Default)]
pub struct ImageGenRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub size: Option<String>,
    pub count: Option<u32>,
    pub quality: Option<String>,
    pub style: Option<String>,
    pub seed: Option<u64>,
    pub steps: Option<u32>,
    pub guidance: Option<f32>,
    pub negative_prompt: Option<String>,
}

/// One generated image
#[derive(Debug, Clone, Default)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub bytes: Option<Vec<u8>>,
    pub format: String,
    pub revised_prompt: Option<String>,
}

/// Image generation response
#[derive(Debug, Clone, Default)]
pub struct ImageGenResponse {
    pub images: Vec<GeneratedImage>,
}

/// Server-side file management (upload, list, retrieve, delete, content)
#[async_trait]
pub trait FileManagement: Send + Sync {
    async fn upload_file(&self, bytes: Vec<u8>, filename: &str, purpose: &str) -> Result<FileInfo> {
        let _ = (bytes, filename, purpose);
        Err(unsupported("upload_file"))
    }

    async fn list_files(&self, purpose: Option<&str>) -> Result<Vec<FileInfo>> {
        let _ = purpose;
        Err(unsupported("list_files"))
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileInfo> {
        let _ = file_id;
        Err(unsupported("retrieve_file"))
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        let _ = file_id;
        Err(unsupported("delete_file"))
    }

    async fn file_content(&self, file_id: &str) -> Result<Vec<u8>> {
        let _ = file_id;
        Err(unsupported("file_content"))
    }
}

/// Metadata for an uploaded server-side file
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub id: String,
    pub filename: String,
    pub purpose: String,
    pub bytes: u64,
    pub created_at: i64,
}

/// Content moderation
#[async_trait]
pub trait Moderation: Send + Sync {
    async fn moderate(&self, input: &str) -> Result<ModerationResult> {
        let _ = input;
        Err(unsupported("moderate"))
    }
}

/// Single moderation classification
#[derive(Debug, Clone, Default)]
pub struct ModerationResult {
    pub flagged: bool,
    pub categories: std::collections::HashMap<String, bool>,
    pub category_scores: std::collections::HashMap<String, f64>,
}

/// CRUD over server-side assistants with tool attachments
#[async_trait]
pub trait Assistants: Send + Sync {
    async fn create_assistant(&self, spec: AssistantSpec) -> Result<AssistantInfo> {
        let _ = spec;
        Err(unsupported("create_assistant"))
    }

    async fn get_assistant(&self, assistant_id: &str) -> Result<AssistantInfo> {
        let _ = assistant_id;
        Err(unsupported("get_assistant"))
    }

    async fn update_assistant(&self, assistant_id: &str, spec: AssistantSpec) -> Result<AssistantInfo> {
        let _ = (assistant_id, spec);
        Err(unsupported("update_assistant"))
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        let _ = assistant_id;
        Err(unsupported("delete_assistant"))
    }

    async fn list_assistants(&self) -> Result<Vec<AssistantInfo>> {
        Err(unsupported("list_assistants"))
    }
}

/// Assistant creation/update payload
#[derive(Debug, Clone, Default)]
pub struct AssistantSpec {
    pub name: Option<String>,
    pub model: String,
    pub instructions: Option<String>,
    pub tools: Vec<Tool>,
}

/// Assistant as returned by the provider
#[derive(Debug, Clone, Default)]
pub struct AssistantInfo {
    pub id: String,
    pub name: Option<String>,
    pub model: String,
    pub instructions: Option<String>,
    pub tools: Vec<Tool>,
}

/// A capability a provider may or may not support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Chat,
    StreamingChat,
    Embedding,
    Tts,
    Stt,
    ImageGeneration,
    FileManagement,
    Moderation,
    Assistants,
    ToolCalling,
    Vision,
    Realtime,
    Reasoning,
    ModelListing,
    Completion,
}

/// Queried by the builder to decide whether a terminal capability request
/// can be satisfied, and by callers that want to branch on provider support
/// at runtime instead of relying solely on the builder's compile-time checks.
pub trait ProviderCapabilities: Send + Sync {
    /// Whether this provider supports the given capability
    fn supports(&self, cap: Capability) -> bool;

    /// The full set of capabilities this provider supports
    fn supported_capabilities(&self) -> Vec<Capability>;
}
