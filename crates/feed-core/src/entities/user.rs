//! User entity - an enriched actor as returned by the service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::serde_helpers::{null_as_default, optional_timestamp};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Application-defined profile fields (name, avatar, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with no profile data
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Map::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Reference form used by the service for enrichment (`SU:<id>`)
    pub fn reference(&self) -> String {
        format!("SU:{}", self.id)
    }

    /// Profile name, if the application stores one under `name`
    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }
}
