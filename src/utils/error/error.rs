//! Unified error type for the client
//!
//! Every fallible operation in the crate returns `Result<T>`, an alias over
//! `GatewayError`. The variants mirror the user-visible error taxonomy: a
//! caller can match on them without reaching into provider internals.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Phase in which a timeout occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    Connect,
    Send,
    Receive,
}

impl std::fmt::Display for TimeoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Send => write!(f, "send"),
            Self::Receive => write!(f, "receive"),
        }
    }
}

/// Unified error type for every provider and transport operation.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// Missing or rejected credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Pre-flight validation failure (empty messages, malformed tool, etc).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response not otherwise classified.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },

    /// 429 or a provider-specific rate-limit signal.
    #[error("rate limit exceeded{}", retry_after.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimit { retry_after: Option<u64> },

    /// Connect, send, or receive phase exceeded its configured timeout.
    #[error("timeout during {phase}")]
    Timeout { phase: TimeoutPhase },

    /// An identifier (file, assistant, model) the provider doesn't recognize.
    #[error("not found: {0}")]
    NotFound(String),

    /// The provider's response did not match the expected schema.
    #[error("response format error: {description}")]
    ResponseFormat { description: String, raw: String },

    /// Provider reported an error in-band (response body or stream event).
    #[error("provider error: {0}")]
    Provider(String),

    /// The selected provider doesn't implement the requested capability.
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),

    /// The caller cancelled the operation.
    #[error("cancelled")]
    Cancelled,

    /// Unclassified error.
    #[error("{0}")]
    Generic(String),
}

impl GatewayError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn rate_limit(retry_after: Option<u64>) -> Self {
        Self::RateLimit { retry_after }
    }

    pub fn timeout(phase: TimeoutPhase) -> Self {
        Self::Timeout { phase }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn response_format(description: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::ResponseFormat {
            description: description.into(),
            raw: raw.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn unsupported_capability(capability: impl Into<String>) -> Self {
        Self::UnsupportedCapability(capability.into())
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }

    /// Maps an HTTP status code to the matching error variant, classifying
    /// the common gateway-level codes and falling back to `Http` for the rest.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::auth(body),
            404 => Self::not_found(body),
            429 => Self::rate_limit(None),
            408 => Self::timeout(TimeoutPhase::Receive),
            _ => Self::http(status, body),
        }
    }

    /// Whether a batch runner or retrying caller should retry this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::RateLimit { .. } | Self::Http { status: 500..=599, .. }
        )
    }

    /// Suggested delay in seconds before retrying, if any.
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after } => retry_after.or(Some(30)),
            Self::Timeout { .. } => Some(1),
            Self::Http { status: 500..=599, .. } => Some(2),
            _ => None,
        }
    }

    /// The HTTP status code this error would map to if surfaced over HTTP.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Auth(_) => 401,
            Self::InvalidRequest(_) => 400,
            Self::Http { status, .. } => *status,
            Self::RateLimit { .. } => 429,
            Self::Timeout { .. } => 408,
            Self::NotFound(_) => 404,
            Self::ResponseFormat { .. } => 502,
            Self::Provider(_) => 502,
            Self::UnsupportedCapability(_) => 501,
            Self::Cancelled => 499,
            Self::Generic(_) => 500,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(TimeoutPhase::Receive)
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), err.to_string())
        } else {
            Self::Generic(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::response_format("failed to parse JSON", err.to_string())
    }
}
