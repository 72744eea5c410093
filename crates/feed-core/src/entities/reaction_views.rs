//! Denormalized reaction views carried by activities and reactions
//!
//! A reactionable record keeps three per-kind views side by side:
//!
//! - own reactions: what the current user reacted with, most recent first
//! - latest reactions: most recent reactions of anyone, most recent first
//!   (curated and capped by the service, so it may miss older own reactions)
//! - counts: total reactions per kind
//!
//! [`ReactionViewsMut`] is the only place the three are updated together.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::Reaction;
use crate::value_objects::{ReactionId, ReactionKind};

/// Reactions grouped by kind, each group ordered most recent first
///
/// Reads never create entries: an absent kind reads as an empty group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionGroups(HashMap<ReactionKind, Vec<Reaction>>);

impl ReactionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reactions of one kind, empty if the kind is absent
    pub fn get(&self, kind: &ReactionKind) -> &[Reaction] {
        match self.0.get(kind) {
            Some(reactions) => reactions.as_slice(),
            None => &[],
        }
    }

    /// Number of reactions of one kind
    pub fn len_of(&self, kind: &ReactionKind) -> usize {
        self.get(kind).len()
    }

    pub fn contains_kind(&self, kind: &ReactionKind) -> bool {
        self.0.contains_key(kind)
    }

    /// True if no kind has an entry (an entry holding an empty group counts)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ReactionKind> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReactionKind, &[Reaction])> {
        self.0.iter().map(|(kind, group)| (kind, group.as_slice()))
    }

    /// Find a reaction by ID within one kind
    pub fn find(&self, kind: &ReactionKind, id: &ReactionId) -> Option<&Reaction> {
        self.get(kind).iter().find(|r| &r.id == id)
    }

    /// Mutable access to a stored reaction, e.g. to add child reactions to it
    pub fn find_mut(&mut self, kind: &ReactionKind, id: &ReactionId) -> Option<&mut Reaction> {
        self.0.get_mut(kind)?.iter_mut().find(|r| &r.id == id)
    }

    /// Insert at the front of the reaction's kind, creating the group if absent
    pub fn push_front(&mut self, reaction: Reaction) {
        self.0
            .entry(reaction.kind.clone())
            .or_default()
            .insert(0, reaction);
    }

    /// Remove the first reaction with `id` from `kind`
    ///
    /// Leaves the map untouched when nothing matches. A group emptied by the
    /// removal keeps its (now empty) entry.
    pub fn remove_by_id(&mut self, kind: &ReactionKind, id: &ReactionId) -> Option<Reaction> {
        let group = self.0.get_mut(kind)?;
        let index = group.iter().position(|r| &r.id == id)?;
        Some(group.remove(index))
    }

    /// Replace a reaction in place, keeping its position
    pub fn replace(&mut self, reaction: &Reaction) -> bool {
        let Some(slot) = self
            .0
            .get_mut(&reaction.kind)
            .and_then(|group| group.iter_mut().find(|r| r.id == reaction.id))
        else {
            return false;
        };
        *slot = reaction.clone();
        true
    }
}

impl FromIterator<(ReactionKind, Vec<Reaction>)> for ReactionGroups {
    fn from_iter<I: IntoIterator<Item = (ReactionKind, Vec<Reaction>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reaction totals per kind
///
/// Counts are unsigned and only ever decremented through a saturating path,
/// so they cannot go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionCounts(HashMap<ReactionKind, u32>);

impl ReactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one kind, 0 if absent
    pub fn get(&self, kind: &ReactionKind) -> u32 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    pub fn contains_kind(&self, kind: &ReactionKind) -> bool {
        self.0.contains_key(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all kinds
    pub fn total(&self) -> u64 {
        self.0.values().map(|&n| u64::from(n)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReactionKind, u32)> {
        self.0.iter().map(|(kind, &n)| (kind, n))
    }

    /// Add one, treating an absent kind as 0
    pub fn increment(&mut self, kind: &ReactionKind) {
        let count = self.0.entry(kind.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Subtract one if the kind is present and above 0; otherwise no-op
    pub fn decrement(&mut self, kind: &ReactionKind) -> bool {
        match self.0.get_mut(kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Set a count outright (used when building records by hand)
    pub fn set(&mut self, kind: ReactionKind, count: u32) {
        self.0.insert(kind, count);
    }
}

impl FromIterator<(ReactionKind, u32)> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = (ReactionKind, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mutable handle on a record's three views
///
/// Records hand this out from `Reactionable::reaction_views_mut`; the
/// add/remove rules below are the only code that mutates the views.
#[derive(Debug)]
pub struct ReactionViewsMut<'a> {
    pub own: &'a mut ReactionGroups,
    pub latest: &'a mut ReactionGroups,
    pub counts: &'a mut ReactionCounts,
}

impl<'a> ReactionViewsMut<'a> {
    pub fn new(
        own: &'a mut ReactionGroups,
        latest: &'a mut ReactionGroups,
        counts: &'a mut ReactionCounts,
    ) -> Self {
        Self {
            own,
            latest,
            counts,
        }
    }

    /// Fold a newly created own reaction into the views
    ///
    /// Prepends to own and latest, then bumps the count. No deduplication:
    /// adding the same reaction twice records it twice.
    pub fn add(&mut self, reaction: Reaction) {
        let kind = reaction.kind.clone();
        self.own.push_front(reaction.clone());
        self.latest.push_front(reaction);
        self.counts.increment(&kind);
    }

    /// Remove an own reaction from the views, matching by ID
    ///
    /// Only reactions present in the own view can be removed. When the ID is
    /// not found there nothing is touched, even if latest holds it. The latest
    /// entry is optional and the count never drops below 0.
    ///
    /// Returns whether the reaction was found in the own view.
    pub fn remove(&mut self, reaction: &Reaction) -> bool {
        if self.own.remove_by_id(&reaction.kind, &reaction.id).is_none() {
            return false;
        }
        self.latest.remove_by_id(&reaction.kind, &reaction.id);
        self.counts.decrement(&reaction.kind);
        true
    }

    /// Swap an updated reaction into both lists without touching counts
    pub fn update(&mut self, reaction: &Reaction) -> bool {
        let in_own = self.own.replace(reaction);
        let in_latest = self.latest.replace(reaction);
        in_own || in_latest
    }
}
