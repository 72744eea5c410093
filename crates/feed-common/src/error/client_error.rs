//! Client error types
//!
//! Unified error handling for the SDK, including decoding of the feed
//! service's JSON error bodies.

use feed_core::DomainError;

use crate::config::ConfigError;
use serde::Deserialize;
use std::fmt;

/// SDK-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Authentication errors
    #[error("Invalid API key or signature")]
    NotAuthenticated,

    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Rate limiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after_secs: Option<u64> },

    // Service errors
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    // Response decoding errors
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal client error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Build an error from a non-2xx service response
    ///
    /// The body is decoded as the service's [`ErrorResponse`] when possible and
    /// otherwise used verbatim as the message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|response| response.detail)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            400 => Self::Validation(message),
            401 => Self::NotAuthenticated,
            403 => Self::InsufficientPermissions(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            429 => Self::RateLimitExceeded {
                retry_after_secs: None,
            },
            _ => Self::Service { status, message },
        }
    }

    /// Get the HTTP status code this error corresponds to
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::NotAuthenticated => 401,

            // 403 Forbidden
            Self::InsufficientPermissions(_) => 403,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 429 Too Many Requests
            Self::RateLimitExceeded { .. } => 429,

            Self::Service { status, .. } => *status,

            // Local failures
            Self::Transport(_)
            | Self::Decode(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => match e {
                DomainError::Service { status, .. } => *status,
                DomainError::Unauthorized(_) => 401,
                DomainError::RateLimited { .. } => 429,
                e if e.is_not_found() => 404,
                e if e.is_validation() => 400,
                _ => 500,
            },
        }
    }

    /// Get error code string
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::InsufficientPermissions(_) => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Service { .. } => "SERVICE_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// Create a not found error for a resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Translate into the error type the API ports speak
impl From<ClientError> for DomainError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Domain(e) => e,
            ClientError::NotAuthenticated => DomainError::Unauthorized("invalid API key or signature".to_string()),
            ClientError::InsufficientPermissions(msg) => DomainError::Unauthorized(msg),
            ClientError::Validation(msg) => DomainError::ValidationError(msg),
            ClientError::RateLimitExceeded { retry_after_secs } => {
                DomainError::RateLimited { retry_after_secs }
            }
            ClientError::Transport(msg) => DomainError::TransportError(msg),
            ClientError::Decode(e) => DomainError::DecodeError(e.to_string()),
            ClientError::Config(e) => DomainError::InternalError(e.to_string()),
            ClientError::Internal(e) => DomainError::InternalError(format!("{e:#}")),
            other => DomainError::Service {
                status: other.status_code(),
                message: other.to_string(),
            },
        }
    }
}

/// Error body returned by the feed service
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Service-specific numeric error code
    #[serde(default)]
    pub code: i64,
    pub detail: String,
    #[serde(default)]
    pub status_code: u16,
    /// Name of the exception raised by the service
    #[serde(default)]
    pub exception: String,
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
