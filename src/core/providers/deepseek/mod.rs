//! DeepSeek Provider
//!
//! Module

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod streaming;

pub use client::DeepSeekClient;
pub use config::DeepSeekConfig;
pub use error::DeepSeekErrorMapper;
pub use models::{DeepSeekModelRegistry, ModelFeature, ModelSpec, get_deepseek_registry};
pub use provider::DeepSeekProvider;
