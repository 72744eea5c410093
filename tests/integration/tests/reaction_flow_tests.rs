//! End-to-end reaction flows
//!
//! Each test drives the client services against the in-memory feed service
//! and checks that the locally updated views agree with what a fresh read
//! from the service returns.
//!
//! Run with: cargo test -p integration-tests --test reaction_flow_tests

use std::collections::HashSet;

use feed_client::{
    AddChildReactionRequest, AddReactionRequest, FeedService, Pagination, ReactionService,
    ReactionSummary, SharedActivity, ToggleOutcome, UpdateReactionRequest,
};
use feed_core::{Activity, FeedId, NewReaction, ReactionKind, Reactionable};
use integration_tests::{
    client_context, init_test_tracing, post, repost, text, timeline, InMemoryFeedService,
};

async fn first_activity(ctx: &feed_client::ClientContext, feed: &FeedId) -> Activity {
    FeedService::new(ctx)
        .fetch(feed, Pagination::default())
        .await
        .expect("fetch feed")
        .into_iter()
        .next()
        .expect("feed has an activity")
}

// ============================================================================
// Local views agree with the service
// ============================================================================

#[tokio::test]
async fn test_like_then_refetch_matches_local() {
    init_test_tracing();
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);

    let mut activity = first_activity(&ctx, &feed).await;
    assert!(activity.own_reactions.is_empty());

    let like = ReactionService::new(&ctx)
        .add_reaction(&mut activity, AddReactionRequest::new("like"))
        .await
        .unwrap();

    assert_eq!(activity.user_own_reaction(&ReactionKind::like()), Some(&like));
    assert_eq!(activity, first_activity(&ctx, &feed).await);
}

#[tokio::test]
async fn test_reaction_walkthrough() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);

    let mut activity = first_activity(&ctx, &feed).await;
    let like = reactions
        .add_reaction(&mut activity, AddReactionRequest::new("like"))
        .await
        .unwrap();
    let comment = reactions
        .add_reaction(
            &mut activity,
            AddReactionRequest::new("comment").with_data(text("nice")),
        )
        .await
        .unwrap();

    assert_eq!(activity.reaction_count(&ReactionKind::like()), 1);
    assert_eq!(activity.reaction_count(&ReactionKind::comment()), 1);

    assert!(reactions.remove_reaction(&mut activity, &like).await.unwrap());

    assert_eq!(activity.reaction_count(&ReactionKind::like()), 0);
    assert!(!activity.has_user_own_reaction(&ReactionKind::like()));
    assert!(activity.latest_reactions_of(&ReactionKind::like()).is_empty());
    assert_eq!(activity.user_own_reaction(&ReactionKind::comment()), Some(&comment));
    assert_eq!(activity.reaction_count(&ReactionKind::comment()), 1);

    let fresh = first_activity(&ctx, &feed).await;
    assert_eq!(fresh.reaction_count(&ReactionKind::like()), 0);
    assert_eq!(fresh.user_own_reaction(&ReactionKind::comment()), Some(&comment));
}

#[tokio::test]
async fn test_update_comment_matches_service() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);

    let mut activity = first_activity(&ctx, &feed).await;
    let comment = reactions
        .add_reaction(
            &mut activity,
            AddReactionRequest::new("comment").with_data(text("teh best")),
        )
        .await
        .unwrap();
    reactions
        .update_reaction(&mut activity, &comment.id, UpdateReactionRequest::new(text("the best")))
        .await
        .unwrap();

    let kind = ReactionKind::comment();
    assert_eq!(activity.latest_reactions_of(&kind)[0].text(), Some("the best"));
    assert_eq!(activity.reaction_count(&kind), 1);
    assert_eq!(activity, first_activity(&ctx, &feed).await);
}

// ============================================================================
// Reposts
// ============================================================================

#[tokio::test]
async fn test_reacting_to_repost_reacts_to_original() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let original = post("bob");
    let original_id = original.id.clone();
    service.publish(&feed, &repost("carol", original));
    let ctx = client_context(&service);

    let mut shared_post = first_activity(&ctx, &feed).await;
    assert!(shared_post.is_repost());

    ReactionService::new(&ctx)
        .add_reaction(&mut shared_post, AddReactionRequest::new("like"))
        .await
        .unwrap();

    // Views live on the reposted activity; the wrapper's own fields stay empty.
    assert!(shared_post.own_reactions.is_empty());
    assert!(shared_post.reaction_counts.is_empty());
    assert_eq!(shared_post.reaction_count(&ReactionKind::like()), 1);
    assert_eq!(
        shared_post.reposted().unwrap().reaction_count(&ReactionKind::like()),
        1
    );

    assert_eq!(service.stored_count(&original_id, &ReactionKind::like()), 1);
    assert_eq!(service.stored_count(&shared_post.id, &ReactionKind::like()), 0);

    assert_eq!(shared_post, first_activity(&ctx, &feed).await);
}

// ============================================================================
// Other users' reactions
// ============================================================================

#[tokio::test]
async fn test_other_users_reactions_are_latest_only() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let activity = post("bob");
    service.publish(&feed, &activity);
    let carols = service.react_as("carol", ReactionKind::like(), &activity.id);
    service.react_as("dave", ReactionKind::like(), &activity.id);
    let ctx = client_context(&service);

    let mut activity = first_activity(&ctx, &feed).await;
    assert_eq!(activity.reaction_count(&ReactionKind::like()), 2);
    assert_eq!(activity.latest_reactions_of(&ReactionKind::like()).len(), 2);
    assert!(!activity.has_user_own_reaction(&ReactionKind::like()));

    // Not among own reactions: a local no-op even though latest lists it.
    let before = activity.clone();
    assert!(!activity.remove_user_own_reaction(&carols));
    assert_eq!(activity, before);
}

#[tokio::test]
async fn test_latest_reactions_are_capped_on_read_only() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let activity = post("bob");
    service.publish(&feed, &activity);
    for i in 0..7 {
        service.react_as(&format!("fan{i}"), ReactionKind::like(), &activity.id);
    }
    let ctx = client_context(&service);
    let limit = ctx.config().reactions.latest_limit as usize;

    let mut activity = first_activity(&ctx, &feed).await;
    assert_eq!(activity.latest_reactions_of(&ReactionKind::like()).len(), limit);
    assert_eq!(activity.reaction_count(&ReactionKind::like()), 7);

    let like = ReactionService::new(&ctx)
        .add_reaction(&mut activity, AddReactionRequest::new("like"))
        .await
        .unwrap();

    // Local adds prepend without trimming; the next read trims again.
    assert_eq!(activity.latest_reactions_of(&ReactionKind::like()).len(), limit + 1);
    assert_eq!(activity.reaction_count(&ReactionKind::like()), 8);

    let fresh = first_activity(&ctx, &feed).await;
    let latest = fresh.latest_reactions_of(&ReactionKind::like());
    assert_eq!(latest.len(), limit);
    assert_eq!(latest[0], like);
}

// ============================================================================
// Toggle, child reactions, failures
// ============================================================================

#[tokio::test]
async fn test_toggle_round_trip() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let original = post("bob");
    service.publish(&feed, &original);
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);

    let mut activity = first_activity(&ctx, &feed).await;
    let first = reactions
        .toggle_reaction(&mut activity, ReactionKind::like())
        .await
        .unwrap();
    assert!(matches!(first, ToggleOutcome::Added(_)));
    assert_eq!(service.stored_count(&original.id, &ReactionKind::like()), 1);

    let second = reactions
        .toggle_reaction(&mut activity, ReactionKind::like())
        .await
        .unwrap();
    assert!(matches!(second, ToggleOutcome::Removed(_)));
    assert_eq!(service.stored_count(&original.id, &ReactionKind::like()), 0);

    // Emptied groups keep their (empty) entry locally; reads agree on the values.
    let fresh = first_activity(&ctx, &feed).await;
    for record in [&activity, &fresh] {
        assert!(!record.has_user_own_reaction(&ReactionKind::like()));
        assert!(record.latest_reactions_of(&ReactionKind::like()).is_empty());
        assert_eq!(record.reaction_count(&ReactionKind::like()), 0);
    }
    assert!(activity.own_reactions.contains_kind(&ReactionKind::like()));
    assert!(!fresh.own_reactions.contains_kind(&ReactionKind::like()));
}

#[tokio::test]
async fn test_like_on_comment() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);

    let mut activity = first_activity(&ctx, &feed).await;
    let mut comment = reactions
        .add_reaction(
            &mut activity,
            AddReactionRequest::new("comment").with_data(text("agreed")),
        )
        .await
        .unwrap();
    let like = reactions
        .add_child_reaction(&mut comment, AddChildReactionRequest::new("like"))
        .await
        .unwrap();

    assert!(comment.has_user_own_reaction(&ReactionKind::like()));
    assert_eq!(comment.reaction_count(&ReactionKind::like()), 1);

    let stored = reactions.get_reaction(&like.id).await.unwrap();
    assert_eq!(stored.parent_id.as_ref(), Some(&comment.id));
    assert!(stored.is_child());

    // Child reactions are not counted on the activity.
    let fresh = first_activity(&ctx, &feed).await;
    assert_eq!(fresh.reaction_count(&ReactionKind::like()), 0);
}

#[tokio::test]
async fn test_failed_call_leaves_views_untouched() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);

    let mut activity = first_activity(&ctx, &feed).await;
    let before = activity.clone();

    service.fail_next_call();
    let err = ReactionService::new(&ctx)
        .add_reaction(&mut activity, AddReactionRequest::new("like"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(activity, before);
}

#[tokio::test]
async fn test_deleting_unknown_reaction_fails_without_local_change() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let activity = post("bob");
    service.publish(&feed, &activity);
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);

    let mut activity = first_activity(&ctx, &feed).await;
    let like = reactions
        .add_reaction(&mut activity, AddReactionRequest::new("like"))
        .await
        .unwrap();
    reactions.remove_reaction(&mut activity, &like).await.unwrap();

    let before = activity.clone();
    let err = reactions
        .remove_reaction(&mut activity, &like)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_REACTION");
    assert_eq!(activity, before);
}

// ============================================================================
// Shared records, events, paging
// ============================================================================

#[tokio::test]
async fn test_shared_activity_concurrent_likes() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);
    let shared = SharedActivity::new(first_activity(&ctx, &feed).await);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = ctx.clone();
            let shared = shared.clone();
            tokio::spawn(async move {
                let new_reaction =
                    NewReaction::new(ReactionKind::like(), shared.target_id(), ctx.user_id());
                let reaction = ctx.reactions_api().add(new_reaction).await.unwrap();
                shared.add_user_own_reaction(reaction);
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let local = shared.snapshot();
    let fresh = first_activity(&ctx, &feed).await;
    assert_eq!(local.reaction_count(&ReactionKind::like()), 8);
    assert_eq!(fresh.reaction_count(&ReactionKind::like()), 8);

    let ids = |activity: &Activity| -> HashSet<String> {
        activity
            .own_reactions
            .get(&ReactionKind::like())
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    };
    assert_eq!(ids(&local), ids(&fresh));

    shared.replace(fresh.clone());
    assert_eq!(shared.snapshot(), fresh);
}

#[tokio::test]
async fn test_events_follow_mutations() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    service.publish(&feed, &post("bob"));
    let ctx = client_context(&service);
    let reactions = ReactionService::new(&ctx);
    let mut activity = first_activity(&ctx, &feed).await;

    let mut events = ctx.subscribe();
    let comment = reactions
        .add_reaction(
            &mut activity,
            AddReactionRequest::new("comment").with_data(text("hi")),
        )
        .await
        .unwrap();
    reactions
        .update_reaction(&mut activity, &comment.id, UpdateReactionRequest::new(text("hello")))
        .await
        .unwrap();
    reactions.remove_reaction(&mut activity, &comment).await.unwrap();
    FeedService::new(&ctx)
        .fetch(&feed, Pagination::default())
        .await
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(events.recv().await.unwrap().event_type());
    }
    assert_eq!(
        seen,
        vec!["REACTION_ADDED", "REACTION_UPDATED", "REACTION_REMOVED", "FEED_REFRESHED"]
    );
}

#[tokio::test]
async fn test_feed_paging() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let posts: Vec<Activity> = (0..3).map(|_| post("bob")).collect();
    for activity in &posts {
        service.publish(&feed, activity);
    }
    let ctx = client_context(&service);
    let feeds = FeedService::new(&ctx);

    let page = feeds
        .fetch(&feed, Pagination::default().limit(2))
        .await
        .unwrap();
    let ids: Vec<_> = page.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, vec![posts[2].id.clone(), posts[1].id.clone()]);

    let older = feeds
        .fetch(&feed, Pagination::default().older_than(posts[1].id.as_str()))
        .await
        .unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].id, posts[0].id);

    let missing = feeds
        .fetch(&timeline("nobody"), Pagination::default())
        .await
        .unwrap_err();
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn test_refresh_and_summary() {
    let service = InMemoryFeedService::new("alice");
    let feed = timeline("alice");
    let activity = post("bob");
    service.publish(&feed, &activity);
    let ctx = client_context(&service);

    let mut local = first_activity(&ctx, &feed).await;
    service.react_as("carol", ReactionKind::comment(), &activity.id);
    ReactionService::new(&ctx)
        .add_reaction(&mut local, AddReactionRequest::new("like"))
        .await
        .unwrap();

    // The local copy has not seen carol's comment until it is refreshed.
    assert_eq!(local.reaction_count(&ReactionKind::comment()), 0);
    FeedService::new(&ctx).refresh(&mut local).await.unwrap();

    let summary = ReactionSummary::for_record(&local);
    assert_eq!(
        summary,
        vec![
            ReactionSummary {
                kind: ReactionKind::comment(),
                count: 1,
                own: false,
            },
            ReactionSummary {
                kind: ReactionKind::like(),
                count: 1,
                own: true,
            },
        ]
    );
}
