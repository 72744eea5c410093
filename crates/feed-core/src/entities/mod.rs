//! Domain entities - core feed objects

mod activity;
mod reaction;
mod reaction_views;
mod serde_helpers;
mod user;

pub use activity::{Activity, ActivityObject, Actor};
pub use reaction::Reaction;
pub use reaction_views::{ReactionCounts, ReactionGroups, ReactionViewsMut};
pub use serde_helpers::parse_timestamp;
pub use user::User;
