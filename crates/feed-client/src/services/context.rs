//! Client context - dependency container for services
//!
//! Holds the API ports, configuration, and event publisher needed by services.

use std::sync::Arc;

use feed_common::{ClientConfig, ClientError};
use feed_core::{FeedApi, FeedEvent, ReactionsApi};
use tokio::sync::broadcast;

use super::error::{ServiceError, ServiceResult};
use super::publisher::Publisher;

/// Client context containing all dependencies
///
/// Cheap to clone; every clone shares the same ports and publisher.
#[derive(Clone)]
pub struct ClientContext {
    // Ports
    reactions_api: Arc<dyn ReactionsApi>,
    feed_api: Arc<dyn FeedApi>,

    config: Arc<ClientConfig>,

    // Events
    publisher: Publisher,
}

impl ClientContext {
    /// Create a new client context with all dependencies
    pub fn new(
        config: ClientConfig,
        reactions_api: Arc<dyn ReactionsApi>,
        feed_api: Arc<dyn FeedApi>,
    ) -> Self {
        Self {
            reactions_api,
            feed_api,
            config: Arc::new(config),
            publisher: Publisher::default(),
        }
    }

    // === Ports ===

    /// Get the reactions API
    pub fn reactions_api(&self) -> &dyn ReactionsApi {
        self.reactions_api.as_ref()
    }

    /// Get the feed API
    pub fn feed_api(&self) -> &dyn FeedApi {
        self.feed_api.as_ref()
    }

    // === Configuration ===

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// ID of the user the SDK acts for
    pub fn user_id(&self) -> &str {
        &self.config.user.id
    }

    // === Events ===

    /// Get the event publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Subscribe to feed events
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.publisher.subscribe()
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("app", &self.config.app.name)
            .field("user_id", &self.config.user.id)
            .field("ports", &"...")
            .field("subscribers", &self.publisher.receiver_count())
            .finish()
    }
}

/// Builder for creating ClientContext with custom configuration
#[derive(Default)]
pub struct ClientContextBuilder {
    config: Option<ClientConfig>,
    reactions_api: Option<Arc<dyn ReactionsApi>>,
    feed_api: Option<Arc<dyn FeedApi>>,
    event_buffer: Option<usize>,
}

impl ClientContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from the environment (and `.env`)
    pub fn config_from_env(mut self) -> ServiceResult<Self> {
        let config = ClientConfig::from_env().map_err(ClientError::from)?;
        self.config = Some(config);
        Ok(self)
    }

    /// Load the configuration from an arbitrary key lookup
    pub fn config_from_lookup<F>(mut self, lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ClientConfig::from_lookup(lookup).map_err(ClientError::from)?;
        self.config = Some(config);
        Ok(self)
    }

    #[must_use]
    pub fn reactions_api(mut self, api: Arc<dyn ReactionsApi>) -> Self {
        self.reactions_api = Some(api);
        self
    }

    #[must_use]
    pub fn feed_api(mut self, api: Arc<dyn FeedApi>) -> Self {
        self.feed_api = Some(api);
        self
    }

    /// Per-subscriber event buffer size
    #[must_use]
    pub fn event_buffer(mut self, buffer: usize) -> Self {
        self.event_buffer = Some(buffer);
        self
    }

    /// Build the ClientContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ClientContext> {
        let mut ctx = ClientContext::new(
            self.config.ok_or_else(|| ServiceError::validation("config is required"))?,
            self.reactions_api.ok_or_else(|| ServiceError::validation("reactions_api is required"))?,
            self.feed_api.ok_or_else(|| ServiceError::validation("feed_api is required"))?,
        );
        if let Some(buffer) = self.event_buffer {
            ctx.publisher = Publisher::new(buffer);
        }
        Ok(ctx)
    }
}
