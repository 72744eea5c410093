//! Reaction kind - the grouping key for reactions ("like", "comment", ...)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category discriminator of a reaction
///
/// Kinds are free-form strings chosen by the application; the well-known ones
/// are exposed as constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionKind(String);

impl ReactionKind {
    /// Maximum length accepted by the service
    pub const MAX_LEN: usize = 255;

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn like() -> Self {
        Self::new("like")
    }

    pub fn comment() -> Self {
        Self::new("comment")
    }

    pub fn repost() -> Self {
        Self::new("repost")
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the kind is something the service will accept
    pub fn validate(&self) -> Result<(), ReactionKindError> {
        if self.0.is_empty() {
            return Err(ReactionKindError::Empty);
        }
        if self.0.chars().count() > Self::MAX_LEN {
            return Err(ReactionKindError::TooLong { max: Self::MAX_LEN });
        }
        if self.0.chars().any(char::is_whitespace) {
            return Err(ReactionKindError::Whitespace);
        }
        Ok(())
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReactionKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for ReactionKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

impl AsRef<str> for ReactionKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Invalid reaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReactionKindError {
    #[error("reaction kind must not be empty")]
    Empty,

    #[error("reaction kind too long: max {max} characters")]
    TooLong { max: usize },

    #[error("reaction kind must not contain whitespace")]
    Whitespace,
}
