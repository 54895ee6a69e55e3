//! Unified stream events produced by the stream state machine (see `core::providers::base::sse`)

use super::chat::ChatResponse;
use super::delta::ToolCallDelta;

/// Where a stream-terminating error originated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamErrorSource {
    /// The transport (connection, TLS, timeout) failed
    Transport,
    /// The provider reported an error frame (e.g. Anthropic `type: error`)
    Provider,
}

/// One unit of a normalized streaming chat response
///
/// Emitted by the stream state machine; reasoning content is always split out
/// of `TextDelta` into `ThinkingDelta` so callers never see `<think>` tags or
/// provider-specific reasoning fields in user-visible text.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Plain user-visible text delta
    TextDelta(String),
    /// Reasoning/thinking delta, kept separate from visible text
    ThinkingDelta(String),
    /// Partial or complete tool call
    ToolCallDelta(ToolCallDelta),
    /// Terminal event carrying the assembled response; concludes the stream
    Completion(Box<ChatResponse>),
    /// Terminal event signalling failure; concludes the stream
    Error(StreamErrorSource, String),
}
