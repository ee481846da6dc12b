//! # Conduit App
//!
//! The client core for a Conduit (`RealWorld`) blogging site: a
//! location-driven router, the session, view state, page renderers and the
//! view models the pages are drawn from.
//!
//! Everything runs through one [`Store`]: location changes and user intents
//! are [`AppAction`]s, the [`AppReducer`] updates [`AppState`] and returns
//! fetch effects, and [`views::screen`] turns the state into a
//! [`views::Screen`] whose controls say which action each element
//! dispatches.
//!
//! ## Example
//!
//! ```ignore
//! use conduit_app::{AppAction, AppConfig, app_store};
//!
//! let store = app_store(api, storage, location, AppConfig::from_env());
//! store.send(AppAction::Start).await?;
//! store.settle().await;
//!
//! let screen = store.state(conduit_app::views::screen).await;
//! ```

pub mod actions;
pub mod config;
pub mod effects;
pub mod environment;
pub mod error;
pub mod platform;
pub mod reducer;
pub mod render;
pub mod route;
pub mod shell;
pub mod state;
pub mod views;

pub use actions::{AppAction, SessionRequest};
pub use config::AppConfig;
pub use environment::AppEnvironment;
pub use error::{AppError, Result};
pub use reducer::AppReducer;
pub use route::{ProfileTab, Route};
pub use state::{AppState, FeedTab};

use conduit_api::ConduitApi;
use conduit_core::environment::{DurableStorage, LocationBar};
use conduit_runtime::Store;
use std::sync::Arc;

/// The store type the client runs on
pub type AppStore<C> = Store<AppState, AppAction, AppEnvironment<C>, AppReducer<C>>;

/// Build a store over the given collaborators
#[must_use]
pub fn app_store<C: ConduitApi>(
    api: C,
    storage: Arc<dyn DurableStorage>,
    location: Arc<dyn LocationBar>,
    config: AppConfig,
) -> AppStore<C> {
    let state = AppState::new(config.page_size);
    let environment = AppEnvironment::new(api, storage, location, config);
    Store::new(state, AppReducer::new(), environment)
}
