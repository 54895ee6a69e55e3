//! Phind provider
//!
//! Phind exposes an OpenAI-compatible `/v1/chat/completions` endpoint but its
//! wire format omits `tool_calls` entirely — tool-calling is unsupported here
//! by design, not by bug, so `PhindProvider` never reports `Capability::ToolCalling`.

mod config;
mod provider;

pub use config::PhindConfig;
pub use provider::PhindProvider;
