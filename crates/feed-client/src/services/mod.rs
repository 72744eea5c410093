//! Client services
//!
//! Services orchestrate a port call and the matching local update of the
//! records the caller holds, then publish a feed event.

pub mod context;
pub mod error;
pub mod feed;
pub mod publisher;
pub mod reaction;


pub use context::{ClientContext, ClientContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use publisher::Publisher;
pub use reaction::{ReactionService, ToggleOutcome};
