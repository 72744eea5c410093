//! Shared activity handle
//!
//! Reaction views are plain data and are not synchronized. When several tasks
//! hold the same activity, they share it through [`SharedActivity`], which
//! serializes every mutation of the record behind one lock.
//!
//! The lock is never held across an `.await`: perform the service call
//! first, then apply the local update through this handle.

use std::sync::Arc;

use feed_core::{Activity, ActivityId, Reaction, ReactionKind, Reactionable};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedActivity(Arc<RwLock<Activity>>);

impl SharedActivity {
    pub fn new(activity: Activity) -> Self {
        Self(Arc::new(RwLock::new(activity)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Activity> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Activity> {
        self.0.write()
    }

    /// Clone the current state
    pub fn snapshot(&self) -> Activity {
        self.0.read().clone()
    }

    pub fn id(&self) -> ActivityId {
        self.0.read().id.clone()
    }

    /// ID the service expects reactions to target (the original for reposts)
    pub fn target_id(&self) -> ActivityId {
        self.0.read().original().id.clone()
    }

    /// Swap in a freshly fetched copy
    pub fn replace(&self, activity: Activity) {
        *self.0.write() = activity;
    }

    pub fn has_user_own_reaction(&self, kind: &ReactionKind) -> bool {
        self.0.read().has_user_own_reaction(kind)
    }

    pub fn user_own_reaction(&self, kind: &ReactionKind) -> Option<Reaction> {
        self.0.read().user_own_reaction(kind).cloned()
    }

    pub fn reaction_count(&self, kind: &ReactionKind) -> u32 {
        self.0.read().reaction_count(kind)
    }

    pub fn add_user_own_reaction(&self, reaction: Reaction) {
        self.0.write().add_user_own_reaction(reaction);
    }

    pub fn remove_user_own_reaction(&self, reaction: &Reaction) -> bool {
        self.0.write().remove_user_own_reaction(reaction)
    }

    pub fn update_user_own_reaction(&self, reaction: &Reaction) -> bool {
        self.0.write().update_user_own_reaction(reaction)
    }

    /// Whether both handles point at the same record
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Activity> for SharedActivity {
    fn from(activity: Activity) -> Self {
        Self::new(activity)
    }
}
