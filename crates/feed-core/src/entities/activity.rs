//! Activity entity - a single feed item that can receive reactions
//!
//! A repost is an activity whose `object` embeds the activity it reposts.
//! Reactions on a repost belong to the reposted activity, so
//! [`Reactionable::original`] redirects there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reaction_views::{ReactionCounts, ReactionGroups, ReactionViewsMut};
use super::serde_helpers::{null_as_default, optional_timestamp};
use super::User;
use crate::traits::Reactionable;
use crate::value_objects::ActivityId;

/// Who performed an activity: a bare reference or an enriched user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actor {
    Reference(String),
    User(User),
}

impl Actor {
    /// The actor's ID, stripping the `SU:` reference prefix
    pub fn id(&self) -> &str {
        match self {
            Self::Reference(reference) => reference.strip_prefix("SU:").unwrap_or(reference),
            Self::User(user) => &user.id,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Reference(_) => None,
        }
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<&str> for Actor {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_string())
    }
}

impl From<String> for Actor {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

/// What an activity is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityObject {
    /// Plain reference such as `post:42`
    Reference(String),
    /// An embedded activity: this activity is a repost of it
    Activity(Box<Activity>),
    /// Any other enriched object
    Other(Value),
}

impl From<&str> for ActivityObject {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_string())
    }
}

impl From<String> for ActivityObject {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

impl From<Activity> for ActivityObject {
    fn from(activity: Activity) -> Self {
        Self::Activity(Box::new(activity))
    }
}

/// Activity entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub actor: Actor,
    pub verb: String,
    pub object: ActivityObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Extra feeds the activity was copied to
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    /// Feed the activity was read from (set by the service on aggregated reads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionGroups::is_empty")]
    pub own_reactions: ReactionGroups,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionGroups::is_empty")]
    pub latest_reactions: ReactionGroups,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "ReactionCounts::is_empty")]
    pub reaction_counts: ReactionCounts,
    /// Application-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    /// Create a new Activity with empty reaction views
    pub fn new(
        id: ActivityId,
        actor: impl Into<Actor>,
        verb: impl Into<String>,
        object: impl Into<ActivityObject>,
    ) -> Self {
        Self {
            id,
            actor: actor.into(),
            verb: verb.into(),
            object: object.into(),
            foreign_id: None,
            time: None,
            target: None,
            to: Vec::new(),
            origin: None,
            own_reactions: ReactionGroups::new(),
            latest_reactions: ReactionGroups::new(),
            reaction_counts: ReactionCounts::new(),
            extra: Map::new(),
        }
    }

    /// Create a repost of `original` by `actor`
    pub fn repost(id: ActivityId, actor: impl Into<Actor>, original: Activity) -> Self {
        Self::new(id, actor, "repost", original)
    }

    /// Check if this activity embeds another one
    #[inline]
    pub fn is_repost(&self) -> bool {
        matches!(self.object, ActivityObject::Activity(_))
    }

    /// The embedded activity of a repost
    pub fn reposted(&self) -> Option<&Activity> {
        match &self.object {
            ActivityObject::Activity(activity) => Some(activity),
            _ => None,
        }
    }

    pub fn with_foreign_id(mut self, foreign_id: impl Into<String>) -> Self {
        self.foreign_id = Some(foreign_id.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

impl Reactionable for Activity {
    fn own_reactions(&self) -> &ReactionGroups {
        &self.own_reactions
    }

    fn latest_reactions(&self) -> &ReactionGroups {
        &self.latest_reactions
    }

    fn reaction_counts(&self) -> &ReactionCounts {
        &self.reaction_counts
    }

    fn reaction_views_mut(&mut self) -> ReactionViewsMut<'_> {
        ReactionViewsMut::new(
            &mut self.own_reactions,
            &mut self.latest_reactions,
            &mut self.reaction_counts,
        )
    }

    fn original(&self) -> &Self {
        match self.object {
            ActivityObject::Activity(ref activity) => activity.as_ref(),
            _ => self,
        }
    }

    fn original_mut(&mut self) -> &mut Self {
        match self.object {
            ActivityObject::Activity(ref mut activity) => activity.as_mut(),
            _ => self,
        }
    }
}
