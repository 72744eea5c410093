//! Reaction service
//!
//! Creates, edits, and deletes reactions through the reactions API and keeps
//! the local reaction views of the records the caller holds in step.
//!
//! Every mutation waits for the service to answer first; the local views are
//! only touched after a successful call, so a failed call leaves the record
//! exactly as it was.

use feed_core::events::{ReactionAddedEvent, ReactionRemovedEvent, ReactionUpdatedEvent};
use feed_core::{Activity, FeedEvent, Reaction, ReactionId, ReactionKind, Reactionable};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{AddChildReactionRequest, AddReactionRequest, UpdateReactionRequest};

use super::context::ClientContext;
use super::error::ServiceResult;

/// Result of [`ReactionService::toggle_reaction`]
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Added(Reaction),
    Removed(Reaction),
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ClientContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Add a reaction by the current user to an activity
    ///
    /// Reacting to a repost reacts to the reposted activity.
    #[instrument(skip(self, activity, request), fields(activity_id = %activity.id, kind = %request.kind))]
    pub async fn add_reaction(
        &self,
        activity: &mut Activity,
        request: AddReactionRequest,
    ) -> ServiceResult<Reaction> {
        request.validate()?;

        let target = activity.original().id.clone();
        let new_reaction = request.into_new_reaction(target, self.ctx.user_id())?;
        let reaction = self.ctx.reactions_api().add(new_reaction).await?;

        activity.add_user_own_reaction(reaction.clone());

        info!(
            reaction_id = %reaction.id,
            activity_id = %reaction.activity_id,
            kind = %reaction.kind,
            "Reaction added"
        );

        let record_id = activity.original().id.to_string();
        self.ctx.publisher().publish(FeedEvent::ReactionAdded(ReactionAddedEvent::new(
            reaction.clone(),
            record_id,
        )));

        Ok(reaction)
    }

    /// Add a child reaction by the current user to a reaction
    ///
    /// Only `parent` gets the new child in its views. Pass the copy that is
    /// displayed (e.g. the entry inside the activity's own or latest
    /// reactions), or refresh the activity afterwards; a cloned parent leaves
    /// the activity's copy unchanged.
    #[instrument(skip(self, parent, request), fields(parent_id = %parent.id, kind = %request.kind))]
    pub async fn add_child_reaction(
        &self,
        parent: &mut Reaction,
        request: AddChildReactionRequest,
    ) -> ServiceResult<Reaction> {
        request.validate()?;

        let new_reaction = request.into_new_reaction(parent, self.ctx.user_id())?;
        let reaction = self.ctx.reactions_api().add(new_reaction).await?;

        parent.add_user_own_reaction(reaction.clone());

        info!(
            reaction_id = %reaction.id,
            parent_id = %parent.id,
            kind = %reaction.kind,
            "Child reaction added"
        );

        self.ctx.publisher().publish(FeedEvent::ReactionAdded(ReactionAddedEvent::new(
            reaction.clone(),
            parent.id.to_string(),
        )));

        Ok(reaction)
    }

    /// Delete one of the current user's reactions
    ///
    /// The reaction is deleted on the service even when the record's own
    /// views do not list it; in that case the local views stay untouched.
    /// Returns whether the local views held the reaction.
    #[instrument(skip(self, record, reaction), fields(reaction_id = %reaction.id, kind = %reaction.kind))]
    pub async fn remove_reaction<R>(&self, record: &mut R, reaction: &Reaction) -> ServiceResult<bool>
    where
        R: Reactionable + Send,
    {
        self.ctx.reactions_api().delete(&reaction.id).await?;

        let tracked = record.remove_user_own_reaction(reaction);
        if !tracked {
            debug!(reaction_id = %reaction.id, "Reaction not among own reactions; local views unchanged");
        }

        info!(
            reaction_id = %reaction.id,
            activity_id = %reaction.activity_id,
            kind = %reaction.kind,
            "Reaction removed"
        );

        self.ctx
            .publisher()
            .publish(FeedEvent::ReactionRemoved(ReactionRemovedEvent::new(reaction, tracked)));

        Ok(tracked)
    }

    /// Remove the current user's most recent reaction of `kind`, or add one
    /// if there is none
    #[instrument(skip(self, activity), fields(activity_id = %activity.id))]
    pub async fn toggle_reaction(
        &self,
        activity: &mut Activity,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        match activity.user_own_reaction(&kind).cloned() {
            Some(existing) => {
                self.remove_reaction(activity, &existing).await?;
                Ok(ToggleOutcome::Removed(existing))
            }
            None => {
                let reaction = self
                    .add_reaction(activity, AddReactionRequest::new(kind.as_str()))
                    .await?;
                Ok(ToggleOutcome::Added(reaction))
            }
        }
    }

    /// Replace the payload of one of the current user's reactions
    ///
    /// Counts are left alone; the edited reaction replaces its old copy in
    /// the own and latest views of `record`.
    #[instrument(skip(self, record, request))]
    pub async fn update_reaction<R>(
        &self,
        record: &mut R,
        reaction_id: &ReactionId,
        request: UpdateReactionRequest,
    ) -> ServiceResult<Reaction>
    where
        R: Reactionable + Send,
    {
        request.validate()?;

        let reaction = self.ctx.reactions_api().update(reaction_id, request.data).await?;

        if !record.update_user_own_reaction(&reaction) {
            debug!(reaction_id = %reaction.id, "Updated reaction not listed locally");
        }

        info!(reaction_id = %reaction.id, kind = %reaction.kind, "Reaction updated");

        self.ctx
            .publisher()
            .publish(FeedEvent::ReactionUpdated(ReactionUpdatedEvent::new(reaction.clone())));

        Ok(reaction)
    }

    /// Fetch a reaction by ID
    #[instrument(skip(self))]
    pub async fn get_reaction(&self, reaction_id: &ReactionId) -> ServiceResult<Reaction> {
        Ok(self.ctx.reactions_api().get(reaction_id).await?)
    }
}
