//! # feed-client
//!
//! Application layer: services that call the feed service through the
//! `feed-core` ports and keep local reaction views in step, request and
//! response DTOs, JSON decoding, and the shared activity handle.

pub mod dto;
pub mod services;
pub mod shared;

pub use dto::{
    decode_activity, decode_error, decode_feed, decode_reaction, decode_reactions,
    AddChildReactionRequest, AddReactionRequest, FeedResponse, Pagination, ReactionSummary,
    ReactionsResponse, UpdateReactionRequest,
};
pub use services::{
    ClientContext, ClientContextBuilder, FeedService, Publisher, ReactionService, ServiceError,
    ServiceResult, ToggleOutcome,
};
pub use shared::SharedActivity;
