//! Module
//!
//! Contains base components shared by all providers

pub mod chat_handle;
pub mod config;
pub mod connection_pool;
pub mod embed_handle;
pub mod pricing;
pub mod sse;
pub mod stream_machine;

pub use chat_handle::{ChatDefaults, ChatHandle, RawChat};
pub use config::BaseConfig;
pub use connection_pool::{
    ConnectionPool, GlobalPoolManager, HeaderPair, HttpMethod, PoolConfig, header, header_owned,
};
pub use embed_handle::RawEmbed;
pub use pricing::{PricingDatabase, get_pricing_db};
pub use sse::{
    AnthropicTransformer, OpenAICompatibleTransformer, SSEEvent, SSEEventType, SSETransformer,
    UnifiedSSEParser, UnifiedSSEStream,
};
pub use stream_machine::{ChatEventStream, RawChatStream};
