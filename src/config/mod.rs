//! Client configuration
//!
//! A single fluent `Builder` replaces per-provider ad-hoc construction: pick
//! a provider, set request defaults and HTTP overrides, then call a terminal
//! method to get back a capability handle bound to that provider.

pub mod builder;

pub use builder::{Builder, HttpBuilder, ProviderId};
