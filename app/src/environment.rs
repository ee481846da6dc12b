//! Injected collaborators
//!
//! Reducers read storage and the location bar synchronously. The API client
//! is only ever called inside effects, bound to the session's token.

use crate::config::AppConfig;
use crate::state::Session;
use conduit_api::ConduitApi;
use conduit_core::environment::{DurableStorage, LocationBar};
use std::sync::Arc;

/// Dependencies of [`AppReducer`](crate::reducer::AppReducer)
#[derive(Clone)]
pub struct AppEnvironment<C: ConduitApi> {
    api: C,
    storage: Arc<dyn DurableStorage>,
    location: Arc<dyn LocationBar>,
    config: AppConfig,
}

impl<C: ConduitApi> AppEnvironment<C> {
    /// Create an environment from its collaborators
    #[must_use]
    pub fn new(
        api: C,
        storage: Arc<dyn DurableStorage>,
        location: Arc<dyn LocationBar>,
        config: AppConfig,
    ) -> Self {
        Self {
            api,
            storage,
            location,
            config,
        }
    }

    /// An API client bound to the session's token, if any
    #[must_use]
    pub fn client(&self, session: &Session) -> C {
        self.api.with_token(session.token.clone())
    }

    /// Durable storage
    #[must_use]
    pub fn storage(&self) -> &dyn DurableStorage {
        self.storage.as_ref()
    }

    /// The location bar
    #[must_use]
    pub fn location(&self) -> &dyn LocationBar {
        self.location.as_ref()
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl<C: ConduitApi + std::fmt::Debug> std::fmt::Debug for AppEnvironment<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("api", &self.api)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
