//! Value objects - immutable types that represent domain concepts

mod feed_id;
mod ids;
mod reaction_kind;

pub use feed_id::{FeedId, FeedIdParseError};
pub use ids::{ActivityId, ReactionId};
pub use reaction_kind::{ReactionKind, ReactionKindError};
