//! Feed events

mod feed_event;

pub use feed_event::{
    FeedEvent, FeedRefreshedEvent, ReactionAddedEvent, ReactionRemovedEvent, ReactionUpdatedEvent,
};
