//! Audio types shared by the speech-to-text and text-to-speech capabilities
//!
//! Providers that support audio (Groq, OpenAI, ElevenLabs) implement the
//! `Stt`/`Tts` traits in [`crate::core::traits`] directly against these
//! request/response types; there is no routing layer here.

pub mod types;

pub use types::{
    SegmentInfo, SpeechRequest, SpeechResponse, TranscriptionRequest, TranscriptionResponse,
    TranslationRequest, TranslationResponse, WordInfo, format_to_content_type,
    supported_audio_formats,
};
