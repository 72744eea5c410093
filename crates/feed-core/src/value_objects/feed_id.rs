//! Feed ID - a feed group slug plus the owner's user ID, written `slug:user_id`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a single feed (e.g. `timeline:alice`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedId {
    slug: String,
    user_id: String,
}

impl FeedId {
    /// Create a feed ID, validating both parts
    pub fn new(slug: impl Into<String>, user_id: impl Into<String>) -> Result<Self, FeedIdParseError> {
        let slug = slug.into();
        let user_id = user_id.into();

        if !is_valid_part(&slug) {
            return Err(FeedIdParseError::InvalidSlug(slug));
        }
        if !is_valid_part(&user_id) {
            return Err(FeedIdParseError::InvalidUserId(user_id));
        }

        Ok(Self { slug, user_id })
    }

    /// Parse from `slug:user_id`
    pub fn parse(s: &str) -> Result<Self, FeedIdParseError> {
        let (slug, user_id) = s.split_once(':').ok_or(FeedIdParseError::MissingSeparator)?;
        Self::new(slug, user_id)
    }

    #[inline]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[inline]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The same form without the separator, as used in some service paths
    pub fn together(&self) -> String {
        format!("{}{}", self.slug, self.user_id)
    }
}

// Slugs and user IDs: letters, digits, `_` and `-`
fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Error when parsing a FeedId
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedIdParseError {
    #[error("feed id must be written as slug:user_id")]
    MissingSeparator,

    #[error("invalid feed slug: {0:?}")]
    InvalidSlug(String),

    #[error("invalid feed user id: {0:?}")]
    InvalidUserId(String),
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.slug, self.user_id)
    }
}

impl std::str::FromStr for FeedId {
    type Err = FeedIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedId::parse(s)
    }
}

impl Serialize for FeedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FeedId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        FeedId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
