//! # feed-core
//!
//! Domain layer containing feed entities, value objects, the Reactionable
//! contract with its reaction-aggregation rules, API ports, and feed events.
//! This crate performs no I/O.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Activity, ActivityObject, Actor, Reaction, ReactionCounts, ReactionGroups, ReactionViewsMut,
    User,
};
pub use error::DomainError;
pub use events::FeedEvent;
pub use traits::{ApiResult, FeedApi, FeedQuery, NewReaction, ReactionsApi, Reactionable};
pub use value_objects::{
    ActivityId, FeedId, FeedIdParseError, ReactionId, ReactionKind, ReactionKindError,
};
