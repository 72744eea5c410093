//! Traits - the Reactionable contract and the service ports

mod api;
mod reactionable;

pub use api::{ApiResult, FeedApi, FeedQuery, NewReaction, ReactionsApi};
pub use reactionable::Reactionable;
