//! Domain errors - error types for the domain layer and its ports

use thiserror::Error;

use crate::value_objects::{ActivityId, FeedIdParseError, ReactionId, ReactionKindError};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("Reaction not found: {0}")]
    ReactionNotFound(ReactionId),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(#[from] ReactionKindError),

    #[error("Invalid feed id: {0}")]
    InvalidFeedId(#[from] FeedIdParseError),

    // =========================================================================
    // Service Errors
    // =========================================================================
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ActivityNotFound(_) => "UNKNOWN_ACTIVITY",
            Self::ReactionNotFound(_) => "UNKNOWN_REACTION",
            Self::FeedNotFound(_) => "UNKNOWN_FEED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidFeedId(_) => "INVALID_FEED_ID",

            // Service
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Service { .. } => "SERVICE_ERROR",

            // Infrastructure
            Self::TransportError(_) => "TRANSPORT_ERROR",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ActivityNotFound(_) | Self::ReactionNotFound(_) | Self::FeedNotFound(_)
        ) || matches!(self, Self::Service { status: 404, .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidReactionKind(_) | Self::InvalidFeedId(_)
        )
    }

    /// Check if repeating the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::TransportError(_) => true,
            Self::Service { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
