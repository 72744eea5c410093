//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

// ============================================================================
// Reaction Requests
// ============================================================================

/// Add a reaction to an activity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReactionRequest {
    #[validate(length(min = 1, max = 255, message = "Reaction kind must be 1-255 characters"))]
    pub kind: String,

    /// Application payload (e.g. `{"text": "..."}` for comments)
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Feeds to notify, as `slug:user_id`
    #[serde(default)]
    #[validate(length(max = 100, message = "At most 100 target feeds"))]
    pub target_feeds: Vec<String>,
}

impl AddReactionRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: Map::new(),
            target_feeds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_target_feeds(mut self, feeds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.target_feeds = feeds.into_iter().map(Into::into).collect();
        self
    }
}

/// Add a child reaction to an existing reaction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddChildReactionRequest {
    #[validate(length(min = 1, max = 255, message = "Reaction kind must be 1-255 characters"))]
    pub kind: String,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default)]
    #[validate(length(max = 100, message = "At most 100 target feeds"))]
    pub target_feeds: Vec<String>,
}

impl AddChildReactionRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: Map::new(),
            target_feeds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }
}

/// Replace a reaction's payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReactionRequest {
    #[validate(custom(function = "validate_non_empty_data"))]
    pub data: Map<String, Value>,
}

impl UpdateReactionRequest {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

fn validate_non_empty_data(data: &Map<String, Value>) -> Result<(), ValidationError> {
    if data.is_empty() {
        return Err(ValidationError::new("empty_data").with_message("Update data must not be empty".into()));
    }
    Ok(())
}

// ============================================================================
// Feed Requests
// ============================================================================

/// Page selection for feed reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: u32,

    #[serde(default)]
    pub offset: u32,

    /// Only activities older than this ID
    #[serde(default)]
    pub id_lt: Option<String>,

    /// Only activities newer than this ID
    #[serde(default)]
    pub id_gt: Option<String>,
}

fn default_limit() -> u32 {
    25
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            id_lt: None,
            id_gt: None,
        }
    }
}

impl Pagination {
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn older_than(mut self, id: impl Into<String>) -> Self {
        self.id_lt = Some(id.into());
        self
    }

    #[must_use]
    pub fn newer_than(mut self, id: impl Into<String>) -> Self {
        self.id_gt = Some(id.into());
        self
    }
}
