//! Common types - re-exports from split modules for backward compatibility
//!
//! This module provides backward compatibility for code that imports from common::

// Re-export everything from the new split modules
pub use super::cache::*;
pub use super::context::*;
pub use super::health::*;
pub use super::metrics::*;
pub use super::model::*;
pub use super::pagination::*;
pub use super::service::*;
