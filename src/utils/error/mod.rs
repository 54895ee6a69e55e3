//! Error handling
//!
//! The unified error type returned by every public operation.

pub mod error;

pub use error::*;
