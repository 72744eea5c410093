//! The Reactionable contract
//!
//! Any record carrying the three reaction views (activities, and reactions
//! for their child reactions) implements this trait. Implementors supply
//! access to their own storage; every query and mutation provided here goes
//! through [`Reactionable::original`] first, so a composite record such as a
//! repost transparently reads and updates the record it wraps.
//!
//! Implementors overriding `original` must not form a cycle. Nothing here
//! detects one.

use crate::entities::{Reaction, ReactionCounts, ReactionGroups, ReactionViewsMut};
use crate::value_objects::ReactionKind;

pub trait Reactionable {
    /// Own reactions stored on this record (not redirected)
    fn own_reactions(&self) -> &ReactionGroups;

    /// Latest reactions stored on this record (not redirected)
    fn latest_reactions(&self) -> &ReactionGroups;

    /// Counts stored on this record (not redirected)
    fn reaction_counts(&self) -> &ReactionCounts;

    /// Mutable access to this record's own storage (not redirected)
    fn reaction_views_mut(&mut self) -> ReactionViewsMut<'_>;

    /// The record whose views are authoritative for `self`
    fn original(&self) -> &Self {
        self
    }

    fn original_mut(&mut self) -> &mut Self {
        self
    }

    fn has_user_own_reaction(&self, kind: &ReactionKind) -> bool {
        self.user_own_reactions_count(kind) > 0
    }

    fn user_own_reactions_count(&self, kind: &ReactionKind) -> usize {
        self.original().own_reactions().len_of(kind)
    }

    /// Most recent own reaction of `kind`
    fn user_own_reaction(&self, kind: &ReactionKind) -> Option<&Reaction> {
        self.original().own_reactions().get(kind).first()
    }

    fn latest_reactions_of(&self, kind: &ReactionKind) -> &[Reaction] {
        self.original().latest_reactions().get(kind)
    }

    fn reaction_count(&self, kind: &ReactionKind) -> u32 {
        self.original().reaction_counts().get(kind)
    }

    /// Record a reaction the current user just created
    fn add_user_own_reaction(&mut self, reaction: Reaction) {
        self.original_mut().reaction_views_mut().add(reaction);
    }

    /// Forget one of the current user's reactions, matching by ID
    ///
    /// Returns false, leaving every view untouched, if the reaction is not
    /// among the record's own reactions.
    fn remove_user_own_reaction(&mut self, reaction: &Reaction) -> bool {
        self.original_mut().reaction_views_mut().remove(reaction)
    }

    /// Replace an edited reaction wherever it is listed
    fn update_user_own_reaction(&mut self, reaction: &Reaction) -> bool {
        self.original_mut().reaction_views_mut().update(reaction)
    }
}
