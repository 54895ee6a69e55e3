//! Stream state machine: turns a provider's raw `ChatChunk` stream into the
//! unified `StreamEvent` stream.
//!
//! Every provider's transport layer (`core::providers::base::sse`'s SSE
//! parser, or a provider's own `streaming.rs`) already speaks its own wire
//! dialect and normalizes it down to `ChatChunk`. What's missing from that
//! layer is the provider-independent part: splitting reasoning content out
//! of visible text (whether the provider sends it as a native delta field or
//! inlines `<think>...</think>` in `content`), forwarding tool-call deltas,
//! and assembling the terminal response once the stream ends.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::collections::BTreeMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::core::providers::thinking::reasoning_utils::check_reasoning_status;
use crate::core::traits::provider::StreamingChat;
use crate::core::types::{
    ChatChoice, ChatChunk, ChatMessage, ChatRequest, ChatResponse, FinishReason, FunctionCall,
    MessageContent, MessageRole, RequestContext, StreamErrorSource, StreamEvent, Tool, ToolCall,
    Usage,
};
use crate::utils::error::{GatewayError, Result};

use super::chat_handle::{ChatDefaults, ChatHandle};
use super::RawChat;

/// A provider's raw streaming chat call, the streaming analog of `RawChat`.
#[async_trait]
pub trait RawChatStream: Send + Sync {
    /// The provider's own error type
    type Error: Into<GatewayError> + Send + Sync + 'static;

    async fn raw_chat_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> std::result::Result<
        Pin<Box<dyn Stream<Item = std::result::Result<ChatChunk, Self::Error>> + Send>>,
        Self::Error,
    >;
}

#[async_trait]
impl<P: RawChat + RawChatStream> StreamingChat for ChatHandle<P> {
    async fn chat_stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<Vec<Tool>>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>> {
        let request = self.defaults().into_request(messages, tools);
        let raw = self
            .provider()
            .raw_chat_stream(request, RequestContext::default())
            .await
            .map_err(Into::into)?;
        let chunks = raw.map(|item| item.map_err(Into::into));
        Ok(Box::pin(ChatEventStream::new(Box::pin(chunks))))
    }
}

/// Running state accumulated across chunks, used to assemble the terminal
/// `Completion` event.
#[derive(Default)]
struct Accumulator {
    id: String,
    model: String,
    created: i64,
    system_fingerprint: Option<String>,
    text: String,
    thinking: String,
    tool_calls: BTreeMap<u32, ToolCallAccum>,
    finish_reason: Option<FinishReason>,
    usage: Option<Usage>,
}

#[derive(Default)]
struct ToolCallAccum {
    id: Option<String>,
    tool_type: Option<String>,
    name: String,
    arguments: String,
}

impl Accumulator {
    fn into_response(self) -> ChatResponse {
        let tool_calls = if self.tool_calls.is_empty() {
            None
        } else {
            Some(
                self.tool_calls
                    .into_values()
                    .map(|acc| ToolCall {
                        id: acc.id.unwrap_or_default(),
                        tool_type: acc.tool_type.unwrap_or_else(|| "function".to_string()),
                        function: FunctionCall {
                            name: acc.name,
                            arguments: acc.arguments,
                        },
                    })
                    .collect(),
            )
        };

        let message = ChatMessage {
            role: MessageRole::Assistant,
            content: if self.text.is_empty() {
                None
            } else {
                Some(MessageContent::Text(self.text))
            },
            tool_calls,
            ..Default::default()
        };

        ChatResponse {
            id: self.id,
            object: "chat.completion".to_string(),
            created: self.created,
            model: self.model,
            choices: vec![ChatChoice {
                index: 0,
                message,
                finish_reason: self.finish_reason,
                logprobs: None,
            }],
            usage: self.usage,
            system_fingerprint: self.system_fingerprint,
            thinking: if self.thinking.is_empty() {
                None
            } else {
                Some(self.thinking)
            },
        }
    }
}

/// Incrementally splits `<think>...</think>` blocks out of a stream of text
/// chunks, tolerating the tags being split across chunk boundaries.
#[derive(Default)]
struct ThinkTagSplitter {
    buf: String,
    in_block: bool,
}

impl ThinkTagSplitter {
    const OPEN: &'static str = "<think>";
    const CLOSE: &'static str = "</think>";

    /// Feed in the next chunk of visible-or-reasoning text, returning
    /// `(visible, thinking)` text that's now safe to emit.
    fn push(&mut self, chunk: &str) -> (String, String) {
        self.buf.push_str(chunk);
        let mut visible = String::new();
        let mut thinking = String::new();

        loop {
            let needle = if self.in_block {
                Self::CLOSE
            } else {
                Self::OPEN
            };

            if let Some(pos) = self.buf.find(needle) {
                let before = self.buf[..pos].to_string();
                if self.in_block {
                    thinking.push_str(&before);
                } else {
                    visible.push_str(&before);
                }
                self.buf = self.buf[pos + needle.len()..].to_string();
                self.in_block = !self.in_block;
                continue;
            }

            let keep = Self::longest_partial_match(&self.buf, needle);
            let safe_len = self.buf.len() - keep;
            let safe = self.buf[..safe_len].to_string();
            if self.in_block {
                thinking.push_str(&safe);
            } else {
                visible.push_str(&safe);
            }
            self.buf = self.buf[safe_len..].to_string();
            break;
        }

        (visible, thinking)
    }

    /// Longest suffix of `buf` (on a char boundary) that is itself a prefix
    /// of `needle` — the part we can't yet classify as in/out of the block.
    fn longest_partial_match(buf: &str, needle: &str) -> usize {
        let max_chars = needle.chars().count().saturating_sub(1);
        let trailing: Vec<char> = buf.chars().rev().take(max_chars).collect();
        for take in (1..=trailing.len()).rev() {
            let candidate: String = trailing[..take].iter().rev().collect();
            if needle.starts_with(&candidate) {
                return candidate.len();
            }
        }
        0
    }
}

fn classify_error(err: &GatewayError) -> StreamErrorSource {
    match err {
        GatewayError::Provider(_) => StreamErrorSource::Provider,
        _ => StreamErrorSource::Transport,
    }
}

/// Adapts `Stream<Item = Result<ChatChunk>>` into `Stream<Item = Result<StreamEvent>>`.
pub struct ChatEventStream {
    inner: Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>>,
    splitter: ThinkTagSplitter,
    has_reasoning: bool,
    last_chunk_reasoning: bool,
    acc: Accumulator,
    pending: std::collections::VecDeque<Result<StreamEvent>>,
    done: bool,
}

impl ChatEventStream {
    pub fn new(inner: Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>>) -> Self {
        Self {
            inner,
            splitter: ThinkTagSplitter::default(),
            has_reasoning: false,
            last_chunk_reasoning: false,
            acc: Accumulator::default(),
            pending: std::collections::VecDeque::new(),
            done: false,
        }
    }

    fn ingest(&mut self, chunk: ChatChunk) {
        self.acc.id = chunk.id;
        self.acc.model = chunk.model;
        self.acc.created = chunk.created;
        if chunk.system_fingerprint.is_some() {
            self.acc.system_fingerprint = chunk.system_fingerprint;
        }
        if chunk.usage.is_some() {
            self.acc.usage = chunk.usage;
        }

        for choice in chunk.choices {
            let delta = choice.delta;

            let (mut visible, native_thinking_present) = match &delta.content {
                Some(text) => (text.clone(), false),
                None => (String::new(), false),
            };
            let _ = native_thinking_present;

            let mut thinking_text = delta.thinking.clone().unwrap_or_default();

            if delta.thinking.is_none() && !visible.is_empty() {
                let (safe_visible, safe_thinking) = self.splitter.push(&visible);
                visible = safe_visible;
                thinking_text = safe_thinking;
            }

            let delta_has_reasoning = delta.thinking.is_some() || !thinking_text.is_empty();
            let status =
                check_reasoning_status(delta_has_reasoning, self.has_reasoning, self.last_chunk_reasoning);
            self.has_reasoning = status.has_reasoning_content;
            self.last_chunk_reasoning = status.updated_last_chunk;

            if !thinking_text.is_empty() {
                self.acc.thinking.push_str(&thinking_text);
                self.pending
                    .push_back(Ok(StreamEvent::ThinkingDelta(thinking_text)));
            }

            if !visible.is_empty() {
                self.acc.text.push_str(&visible);
                self.pending.push_back(Ok(StreamEvent::TextDelta(visible)));
            }

            if let Some(tool_calls) = delta.tool_calls {
                for tc in tool_calls {
                    let entry = self.acc.tool_calls.entry(tc.index).or_default();
                    if let Some(id) = &tc.id {
                        entry.id = Some(id.clone());
                    }
                    if let Some(tool_type) = &tc.tool_type {
                        entry.tool_type = Some(tool_type.clone());
                    }
                    if let Some(function) = &tc.function {
                        if let Some(name) = &function.name {
                            entry.name.push_str(name);
                        }
                        if let Some(arguments) = &function.arguments {
                            entry.arguments.push_str(arguments);
                        }
                    }
                    self.pending.push_back(Ok(StreamEvent::ToolCallDelta(tc)));
                }
            }

            if choice.finish_reason.is_some() {
                self.acc.finish_reason = choice.finish_reason;
            }
        }
    }

    fn finish(&mut self) {
        let acc = std::mem::take(&mut self.acc);
        self.pending
            .push_back(Ok(StreamEvent::Completion(Box::new(acc.into_response()))));
        self.done = true;
    }
}

impl Stream for ChatEventStream {
    type Item = Result<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.ingest(chunk),
                Poll::Ready(Some(Err(err))) => {
                    let source = classify_error(&err);
                    this.pending
                        .push_back(Ok(StreamEvent::Error(source, err.to_string())));
                    this.done = true;
                }
                Poll::Ready(None) => this.finish(),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::responses::{ChatDelta, ChatStreamChoice};

    fn text_chunk(content: &str, finish: Option<FinishReason>) -> ChatChunk {
        ChatChunk {
            id: "chunk-1".to_string(),
            object: "chat.completion.chunk".to_string(),
            created: 0,
            model: "test-model".to_string(),
            choices: vec![ChatStreamChoice {
                index: 0,
                delta: ChatDelta {
                    role: None,
                    content: Some(content.to_string()),
                    thinking: None,
                    tool_calls: None,
                    function_call: None,
                },
                finish_reason: finish,
                logprobs: None,
            }],
            usage: None,
            system_fingerprint: None,
        }
    }

    #[tokio::test]
    async fn splits_native_thinking_delta_from_visible_text() {
        let chunks = vec![
            Ok(ChatChunk {
                id: "1".into(),
                object: "chat.completion.chunk".into(),
                created: 0,
                model: "deepseek-reasoner".into(),
                choices: vec![ChatStreamChoice {
                    index: 0,
                    delta: ChatDelta {
                        role: None,
                        content: None,
                        thinking: Some("pondering...".to_string()),
                        tool_calls: None,
                        function_call: None,
                    },
                    finish_reason: None,
                    logprobs: None,
                }],
                usage: None,
                system_fingerprint: None,
            }),
            Ok(text_chunk("42", Some(FinishReason::Stop))),
        ];
        let stream: Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>> =
            Box::pin(futures::stream::iter(chunks));
        let events: Vec<_> = ChatEventStream::new(stream).collect().await;

        assert!(matches!(&events[0], Ok(StreamEvent::ThinkingDelta(t)) if t == "pondering..."));
        assert!(matches!(&events[1], Ok(StreamEvent::TextDelta(t)) if t == "42"));
        match &events[2] {
            Ok(StreamEvent::Completion(resp)) => {
                assert_eq!(resp.thinking.as_deref(), Some("pondering..."));
                assert_eq!(resp.first_content(), Some("42"));
            }
            other => panic!("expected Completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn splits_inline_think_tags_across_chunk_boundaries() {
        let chunks = vec![
            Ok(text_chunk("<thi", None)),
            Ok(text_chunk("nk>hidden</th", None)),
            Ok(text_chunk("ink>visible", Some(FinishReason::Stop))),
        ];
        let stream: Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>> =
            Box::pin(futures::stream::iter(chunks));
        let events: Vec<_> = ChatEventStream::new(stream).collect().await;

        let thinking: String = events
            .iter()
            .filter_map(|e| match e {
                Ok(StreamEvent::ThinkingDelta(t)) => Some(t.clone()),
                _ => None,
            })
            .collect();
        let visible: String = events
            .iter()
            .filter_map(|e| match e {
                Ok(StreamEvent::TextDelta(t)) => Some(t.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(thinking, "hidden");
        assert_eq!(visible, "visible");
    }

    #[tokio::test]
    async fn emits_error_event_on_transport_failure() {
        let chunks: Vec<Result<ChatChunk>> = vec![Err(GatewayError::timeout(
            crate::utils::error::TimeoutPhase::Receive,
        ))];
        let stream: Pin<Box<dyn Stream<Item = Result<ChatChunk>> + Send>> =
            Box::pin(futures::stream::iter(chunks));
        let events: Vec<_> = ChatEventStream::new(stream).collect().await;

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Ok(StreamEvent::Error(StreamErrorSource::Transport, _))
        ));
    }
}
