//! Reaction entity - a like, comment, or other typed response to an activity
//!
//! Reactions can themselves be reacted to (a like on a comment), so a
//! reaction carries its own child views and is [`Reactionable`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reaction_views::{ReactionCounts, ReactionGroups, ReactionViewsMut};
use super::serde_helpers::{empty_string_as_none, null_as_default, optional_timestamp, timestamp};
use super::User;
use crate::traits::Reactionable;
use crate::value_objects::{ActivityId, ReactionId, ReactionKind};

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub kind: ReactionKind,
    pub activity_id: ActivityId,
    pub user_id: String,
    /// Enriched author, when the service was asked to include it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Parent reaction for child reactions; the service sends `""` for none
    #[serde(
        default,
        rename = "parent",
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<ReactionId>,
    /// Application payload (comment text, ...), opaque to aggregation
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(with = "timestamp", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionGroups::is_empty")]
    pub own_children: ReactionGroups,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionGroups::is_empty")]
    pub latest_children: ReactionGroups,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionCounts::is_empty")]
    pub children_counts: ReactionCounts,
}

impl Reaction {
    /// Create a new top-level Reaction
    pub fn new(
        id: ReactionId,
        kind: ReactionKind,
        activity_id: ActivityId,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            activity_id,
            user_id: user_id.into(),
            user: None,
            parent_id: None,
            data: Map::new(),
            created_at: Utc::now(),
            updated_at: None,
            own_children: ReactionGroups::new(),
            latest_children: ReactionGroups::new(),
            children_counts: ReactionCounts::new(),
        }
    }

    /// Create a child reaction on `parent`
    pub fn child_of(
        parent: &Reaction,
        id: ReactionId,
        kind: ReactionKind,
        user_id: impl Into<String>,
    ) -> Self {
        let mut child = Self::new(id, kind, parent.activity_id.clone(), user_id);
        child.parent_id = Some(parent.id.clone());
        child
    }

    /// Attach an application payload
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Check if reaction is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: &ReactionKind) -> bool {
        &self.kind == kind
    }

    /// Check if this is a reaction on another reaction
    #[inline]
    pub fn is_child(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Comment text, if the payload stores one under `text`
    pub fn text(&self) -> Option<&str> {
        self.data.get("text").and_then(Value::as_str)
    }
}

impl Reactionable for Reaction {
    fn own_reactions(&self) -> &ReactionGroups {
        &self.own_children
    }

    fn latest_reactions(&self) -> &ReactionGroups {
        &self.latest_children
    }

    fn reaction_counts(&self) -> &ReactionCounts {
        &self.children_counts
    }

    fn reaction_views_mut(&mut self) -> ReactionViewsMut<'_> {
        ReactionViewsMut::new(
            &mut self.own_children,
            &mut self.latest_children,
            &mut self.children_counts,
        )
    }
}
