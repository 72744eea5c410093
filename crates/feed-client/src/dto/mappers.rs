//! Request to port-input mappers and record summaries

use std::collections::BTreeSet;

use feed_core::{
    ActivityId, DomainError, FeedId, NewReaction, Reaction, ReactionKind, Reactionable,
};

use super::requests::{AddChildReactionRequest, AddReactionRequest};
use super::responses::ReactionSummary;

fn parse_kind(raw: String) -> Result<ReactionKind, DomainError> {
    let kind = ReactionKind::new(raw);
    kind.validate()?;
    Ok(kind)
}

fn parse_feeds(raw: &[String]) -> Result<Vec<FeedId>, DomainError> {
    raw.iter()
        .map(|feed| FeedId::parse(feed).map_err(DomainError::from))
        .collect()
}

impl AddReactionRequest {
    /// Build the reaction to create on `activity_id` for `user_id`
    ///
    /// # Errors
    /// Returns a validation error for a malformed kind or target feed
    pub fn into_new_reaction(
        self,
        activity_id: ActivityId,
        user_id: &str,
    ) -> Result<NewReaction, DomainError> {
        let target_feeds = parse_feeds(&self.target_feeds)?;
        Ok(NewReaction::new(parse_kind(self.kind)?, activity_id, user_id)
            .with_data(self.data)
            .with_target_feeds(target_feeds))
    }
}

impl AddChildReactionRequest {
    /// Build the child reaction to create under `parent` for `user_id`
    ///
    /// # Errors
    /// Returns a validation error for a malformed kind or target feed
    pub fn into_new_reaction(self, parent: &Reaction, user_id: &str) -> Result<NewReaction, DomainError> {
        let target_feeds = parse_feeds(&self.target_feeds)?;
        Ok(NewReaction::child(parse_kind(self.kind)?, parent, user_id)
            .with_data(self.data)
            .with_target_feeds(target_feeds))
    }
}

impl ReactionSummary {
    /// Summarize every kind a record knows about, ordered by kind
    pub fn for_record<R: Reactionable>(record: &R) -> Vec<Self> {
        let original = record.original();
        let kinds: BTreeSet<&ReactionKind> = original
            .reaction_counts()
            .iter()
            .map(|(kind, _)| kind)
            .chain(original.own_reactions().kinds())
            .collect();

        kinds
            .into_iter()
            .map(|kind| Self {
                kind: kind.clone(),
                count: original.reaction_count(kind),
                own: original.has_user_own_reaction(kind),
            })
            .collect()
    }
}
