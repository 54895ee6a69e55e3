mod helpers;
mod processing;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export all public types and structs for backward compatibility
pub use types::{ChatCompletionRequest, MessageContent, RequestUtils, ToolCall, ToolFunction};
