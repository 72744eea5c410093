//! Data transfer objects for service calls and responses
//!
//! This module provides:
//! - Request DTOs with validation for service inputs
//! - Response envelopes as sent by the feed service
//! - Decoders for raw response bodies
//! - Mappers from requests to port inputs and from records to summaries

pub mod decode;
pub mod mappers;
pub mod requests;
pub mod responses;

pub use decode::{decode_activity, decode_error, decode_feed, decode_reaction, decode_reactions};
pub use requests::{AddChildReactionRequest, AddReactionRequest, Pagination, UpdateReactionRequest};
pub use responses::{FeedResponse, ReactionSummary, ReactionsResponse};
