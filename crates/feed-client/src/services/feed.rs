//! Feed service
//!
//! Reads feed pages with enriched reaction views. A fetched activity carries
//! the service's authoritative views; callers replace their local copy with
//! it wholesale rather than merging.

use feed_core::events::FeedRefreshedEvent;
use feed_core::{Activity, ActivityId, FeedEvent, FeedId, FeedQuery};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::Pagination;

use super::context::ClientContext;
use super::error::{ServiceError, ServiceResult};

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ClientContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Read one page of `feed` with own reactions, latest reactions, and counts
    #[instrument(skip(self, feed), fields(feed = %feed))]
    pub async fn fetch(&self, feed: &FeedId, pagination: Pagination) -> ServiceResult<Vec<Activity>> {
        pagination.validate()?;

        let query = self.enriched_query(pagination);
        let activities = self.ctx.feed_api().activities(feed, &query).await?;

        info!(count = activities.len(), "Feed fetched");

        self.ctx
            .publisher()
            .publish(FeedEvent::FeedRefreshed(FeedRefreshedEvent::new(
                feed.clone(),
                activities.len(),
            )));

        Ok(activities)
    }

    /// Re-read a single activity and replace the local copy with it
    #[instrument(skip(self, activity), fields(activity_id = %activity.id))]
    pub async fn refresh(&self, activity: &mut Activity) -> ServiceResult<()> {
        let ids = [activity.id.clone()];
        let fresh = self
            .ctx
            .feed_api()
            .activities_by_id(&ids)
            .await?
            .into_iter()
            .find(|fresh| fresh.id == activity.id)
            .ok_or_else(|| ServiceError::not_found("Activity", activity.id.to_string()))?;

        *activity = fresh;
        info!("Activity refreshed");
        Ok(())
    }

    fn enriched_query(&self, pagination: Pagination) -> FeedQuery {
        FeedQuery {
            limit: pagination.limit,
            offset: pagination.offset,
            id_lt: pagination.id_lt.map(ActivityId::from),
            id_gt: pagination.id_gt.map(ActivityId::from),
            recent_reactions_limit: Some(self.ctx.config().reactions.latest_limit),
            ..FeedQuery::enriched()
        }
    }
}
