//! Test helpers for integration tests
//!
//! [`InMemoryFeedService`] stands in for the hosted feed service. It stores
//! activities and every user's reactions, computes the enriched views for
//! one viewing user on each read, and passes every response through the same
//! JSON decoders the client uses on real responses.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use feed_client::{decode_feed, decode_reaction, ClientContext, FeedResponse};
use feed_common::{try_init_tracing_with_config, ClientConfig, TracingConfig};
use feed_core::{
    Activity, ActivityId, ActivityObject, ApiResult, DomainError, FeedApi, FeedId, FeedQuery,
    NewReaction, Reaction, ReactionCounts, ReactionGroups, ReactionId, ReactionKind,
    ReactionsApi,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};

/// Install a development subscriber once; later calls are no-ops
pub fn init_test_tracing() {
    let _ = try_init_tracing_with_config(TracingConfig::development());
}

#[derive(Default)]
struct ServiceState {
    /// Stored without reaction views; reads compute them
    activities: HashMap<ActivityId, Activity>,
    /// Oldest first
    feeds: HashMap<FeedId, Vec<ActivityId>>,
    /// Every user's reactions, oldest first
    reactions: Vec<Reaction>,
    fail_next: bool,
}

/// In-memory feed service reading as one viewing user
pub struct InMemoryFeedService {
    viewer: String,
    state: Mutex<ServiceState>,
}

impl InMemoryFeedService {
    pub fn new(viewer: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            viewer: viewer.into(),
            state: Mutex::new(ServiceState::default()),
        })
    }

    pub fn viewer(&self) -> &str {
        &self.viewer
    }

    /// Add an activity to `feed`; reposted activities become reactable too
    pub fn publish(&self, feed: &FeedId, activity: &Activity) {
        let mut state = self.state.lock();
        let stored = without_views(activity.clone());
        if let Some(original) = stored.reposted() {
            state
                .activities
                .entry(original.id.clone())
                .or_insert_with(|| original.clone());
        }
        state
            .feeds
            .entry(feed.clone())
            .or_default()
            .push(stored.id.clone());
        state.activities.insert(stored.id.clone(), stored);
    }

    /// Record a reaction by some other user directly on the service
    pub fn react_as(&self, user_id: &str, kind: ReactionKind, activity_id: &ActivityId) -> Reaction {
        let reaction = Reaction::new(ReactionId::generate(), kind, activity_id.clone(), user_id);
        let reaction = wire(&reaction).expect("reaction survives the wire");
        self.state.lock().reactions.push(reaction.clone());
        reaction
    }

    /// Reactions of `kind` stored for `activity_id`, any user
    pub fn stored_count(&self, activity_id: &ActivityId, kind: &ReactionKind) -> usize {
        self.state
            .lock()
            .reactions
            .iter()
            .filter(|r| &r.activity_id == activity_id && &r.kind == kind && r.parent_id.is_none())
            .count()
    }

    /// Make the next call fail with a transport error
    pub fn fail_next_call(&self) {
        self.state.lock().fail_next = true;
    }

    fn check(&self) -> ApiResult<()> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(DomainError::TransportError("connection reset by peer".to_string()));
        }
        Ok(())
    }

    fn enrich(&self, reactions: &[Reaction], activity: &mut Activity, query: &FeedQuery) {
        if let ActivityObject::Activity(original) = &mut activity.object {
            self.enrich(reactions, original, query);
        }

        let on_activity: Vec<&Reaction> = reactions
            .iter()
            .rev()
            .filter(|r| r.activity_id == activity.id && r.parent_id.is_none())
            .collect();

        if query.with_own_reactions {
            let own = on_activity.iter().filter(|r| r.user_id == self.viewer).copied();
            activity.own_reactions = group(own, None);
        }
        if query.with_recent_reactions {
            activity.latest_reactions = group(on_activity.iter().copied(), query.recent_reactions_limit);
        }
        if query.with_reaction_counts {
            let mut counts: HashMap<ReactionKind, u32> = HashMap::new();
            for reaction in &on_activity {
                *counts.entry(reaction.kind.clone()).or_default() += 1;
            }
            activity.reaction_counts = counts.into_iter().collect::<ReactionCounts>();
        }
    }
}

/// Group newest-first reactions by kind, keeping at most `limit` per kind
fn group<'a>(reactions: impl Iterator<Item = &'a Reaction>, limit: Option<u32>) -> ReactionGroups {
    let mut groups: HashMap<ReactionKind, Vec<Reaction>> = HashMap::new();
    for reaction in reactions {
        let entries = groups.entry(reaction.kind.clone()).or_default();
        if limit.map_or(true, |limit| entries.len() < limit as usize) {
            entries.push(reaction.clone());
        }
    }
    groups.into_iter().collect()
}

fn without_views(mut activity: Activity) -> Activity {
    activity.own_reactions = ReactionGroups::default();
    activity.latest_reactions = ReactionGroups::default();
    activity.reaction_counts = ReactionCounts::default();
    if let ActivityObject::Activity(original) = activity.object {
        activity.object = ActivityObject::Activity(Box::new(without_views(*original)));
    }
    activity
}

fn encode<T: serde::Serialize>(value: &T) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| DomainError::InternalError(e.to_string()))
}

/// Send a reaction over the wire
fn wire(reaction: &Reaction) -> ApiResult<Reaction> {
    decode_reaction(&encode(reaction)?).map_err(DomainError::from)
}

fn wire_feed(results: Vec<Activity>, next: Option<String>) -> ApiResult<Vec<Activity>> {
    let page = FeedResponse {
        results,
        next: Some(next.unwrap_or_default()),
        duration: Some("0.42ms".to_string()),
    };
    let decoded = decode_feed(&encode(&page)?).map_err(DomainError::from)?;
    Ok(decoded.results)
}

#[async_trait]
impl ReactionsApi for InMemoryFeedService {
    async fn add(&self, new_reaction: NewReaction) -> ApiResult<Reaction> {
        self.check()?;
        let mut state = self.state.lock();

        if !state.activities.contains_key(&new_reaction.activity_id) {
            return Err(DomainError::ActivityNotFound(new_reaction.activity_id));
        }
        if let Some(parent_id) = &new_reaction.parent_id {
            if !state.reactions.iter().any(|r| &r.id == parent_id) {
                return Err(DomainError::ReactionNotFound(parent_id.clone()));
            }
        }

        let mut reaction = Reaction::new(
            ReactionId::generate(),
            new_reaction.kind,
            new_reaction.activity_id,
            new_reaction.user_id,
        )
        .with_data(new_reaction.data);
        reaction.parent_id = new_reaction.parent_id;

        let reaction = wire(&reaction)?;
        state.reactions.push(reaction.clone());
        tracing::debug!(reaction_id = %reaction.id, "Stored reaction");
        Ok(reaction)
    }

    async fn get(&self, id: &ReactionId) -> ApiResult<Reaction> {
        self.check()?;
        let state = self.state.lock();
        let reaction = state
            .reactions
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| DomainError::ReactionNotFound(id.clone()))?;
        wire(reaction)
    }

    async fn update(&self, id: &ReactionId, data: Map<String, Value>) -> ApiResult<Reaction> {
        self.check()?;
        let mut state = self.state.lock();
        let reaction = state
            .reactions
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| DomainError::ReactionNotFound(id.clone()))?;
        reaction.data = data;
        wire(reaction)
    }

    async fn delete(&self, id: &ReactionId) -> ApiResult<()> {
        self.check()?;
        let mut state = self.state.lock();
        let position = state
            .reactions
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| DomainError::ReactionNotFound(id.clone()))?;
        state.reactions.remove(position);
        Ok(())
    }
}

#[async_trait]
impl FeedApi for InMemoryFeedService {
    async fn activities(&self, feed: &FeedId, query: &FeedQuery) -> ApiResult<Vec<Activity>> {
        self.check()?;
        let state = self.state.lock();
        let ids = state
            .feeds
            .get(feed)
            .ok_or_else(|| DomainError::FeedNotFound(feed.to_string()))?;

        // Newest first; id_lt / id_gt select by position relative to the cursor
        let mut newest_first: Vec<&ActivityId> = ids.iter().rev().collect();
        if let Some(cursor) = &query.id_lt {
            if let Some(index) = newest_first.iter().position(|id| *id == cursor) {
                newest_first.drain(..=index);
            }
        }
        if let Some(cursor) = &query.id_gt {
            if let Some(index) = newest_first.iter().position(|id| *id == cursor) {
                newest_first.truncate(index);
            }
        }

        let offset = query.offset as usize;
        let limit = query.limit as usize;
        let has_more = newest_first.len() > offset + limit;

        let mut page = Vec::new();
        for id in newest_first.into_iter().skip(offset).take(limit) {
            if let Some(stored) = state.activities.get(id) {
                let mut activity = stored.clone();
                self.enrich(&state.reactions, &mut activity, query);
                page.push(activity);
            }
        }

        let next = has_more.then(|| format!("/feed/{}/{}/?offset={}", feed.slug(), feed.user_id(), offset + limit));
        wire_feed(page, next)
    }

    async fn activities_by_id(&self, ids: &[ActivityId]) -> ApiResult<Vec<Activity>> {
        self.check()?;
        let state = self.state.lock();
        let query = FeedQuery::enriched();

        let mut found = Vec::new();
        for id in ids {
            if let Some(stored) = state.activities.get(id) {
                let mut activity = stored.clone();
                self.enrich(&state.reactions, &mut activity, &query);
                found.push(activity);
            }
        }
        wire_feed(found, None)
    }
}

/// Context acting as the service's viewer
pub fn client_context(service: &Arc<InMemoryFeedService>) -> ClientContext {
    ClientContext::new(
        ClientConfig::new("test-key", "test-app", service.viewer()),
        service.clone(),
        service.clone(),
    )
}
