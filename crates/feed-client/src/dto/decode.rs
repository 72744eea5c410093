//! Response body decoding

use feed_common::{ClientError, ClientResult};
use feed_core::{Activity, Reaction};

use super::responses::{FeedResponse, ReactionsResponse};

/// Decode a feed page
pub fn decode_feed(body: &[u8]) -> ClientResult<FeedResponse<Activity>> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single activity
pub fn decode_activity(body: &[u8]) -> ClientResult<Activity> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single reaction
pub fn decode_reaction(body: &[u8]) -> ClientResult<Reaction> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a reaction listing
pub fn decode_reactions(body: &[u8]) -> ClientResult<ReactionsResponse> {
    Ok(serde_json::from_slice(body)?)
}

/// Turn a non-2xx response into an error
pub fn decode_error(status: u16, body: &[u8]) -> ClientError {
    ClientError::from_status(status, &String::from_utf8_lossy(body))
}
