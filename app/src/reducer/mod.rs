//! Application reducers
//!
//! [`AppReducer`] routes each action to the sub-reducer that owns it:
//! navigation (route transitions), session (login, register, refresh,
//! settings, logout), pages (fetch results) and interactions (tabs,
//! pagination, favorites, follows, articles, comments, alerts).
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod interactions;
pub mod navigation;
pub mod pages;
pub mod session;

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::state::{Alert, AppState};
use conduit_api::ConduitApi;
use conduit_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::marker::PhantomData;

pub use interactions::InteractionReducer;
pub use pages::PageReducer;
pub use session::SessionReducer;

/// Effects returned by every reducer in this crate
pub type Effects = SmallVec<[Effect<AppAction>; 4]>;

/// Unified application reducer
#[derive(Debug)]
pub struct AppReducer<C> {
    session: SessionReducer<C>,
    pages: PageReducer<C>,
    interactions: InteractionReducer<C>,
}

impl<C> AppReducer<C> {
    /// Create the application reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session: SessionReducer::new(),
            pages: PageReducer::new(),
            interactions: InteractionReducer::new(),
        }
    }
}

impl<C> Default for AppReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for AppReducer<C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<C: ConduitApi> Reducer for AppReducer<C> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            // Navigation
            AppAction::LocationChanged { location } => navigation::transition(state, &location, env),
            AppAction::Navigate { path } => navigation::navigate(state, &path, env),

            // Session
            AppAction::Start
            | AppAction::Login { .. }
            | AppAction::Register { .. }
            | AppAction::UpdateSettings { .. }
            | AppAction::RefreshCurrentUser
            | AppAction::Logout
            | AppAction::SessionResponse { .. }
            | AppAction::CurrentUserLoaded { .. } => self.session.reduce(state, action, env),

            // Page loads
            AppAction::TagsLoaded { .. }
            | AppAction::ListLoaded { .. }
            | AppAction::ArticleLoaded { .. }
            | AppAction::EditorArticleLoaded { .. }
            | AppAction::ProfileLoaded { .. } => self.pages.reduce(state, action, env),

            // Interactions
            AppAction::SelectTab { .. }
            | AppAction::SelectPage { .. }
            | AppAction::ToggleFavorite { .. }
            | AppAction::FavoriteToggled { .. }
            | AppAction::ToggleFollow { .. }
            | AppAction::FollowToggled { .. }
            | AppAction::PublishArticle { .. }
            | AppAction::ArticlePublished { .. }
            | AppAction::DeleteArticle { .. }
            | AppAction::ArticleDeleted { .. }
            | AppAction::PostComment { .. }
            | AppAction::CommentPosted { .. }
            | AppAction::DeleteComment { .. }
            | AppAction::CommentDeleted { .. }
            | AppAction::DismissAlert { .. } => self.interactions.reduce(state, action, env),
        }
    }
}

/// Marker shared by the sub-reducers; they hold no data of their own
pub(crate) type ApiMarker<C> = PhantomData<fn() -> C>;

/// Whether a page result was requested under the current generation
///
/// Stale results are logged and dropped.
pub(crate) fn is_current(state: &AppState, generation: u64, what: &str) -> bool {
    if generation == state.generation {
        true
    } else {
        tracing::warn!(
            what,
            generation,
            current = state.generation,
            "Discarding stale result"
        );
        false
    }
}

/// Show a transient alert and schedule its dismissal
pub(crate) fn raise_alert<C: ConduitApi>(
    state: &mut AppState,
    message: &str,
    env: &AppEnvironment<C>,
) -> Effect<AppAction> {
    state.last_alert_id += 1;
    let id = state.last_alert_id;
    state.alert = Some(Alert {
        id,
        message: message.to_string(),
    });
    crate::effects::dismiss_alert(id, env.config().alert_ttl)
}

/// Field messages of a failed form submission, or `fallback`
pub(crate) fn form_errors(error: &conduit_api::ApiError, fallback: &str) -> Vec<String> {
    match error.validation_errors() {
        Some(errors) if !errors.is_empty() => errors.to_messages(),
        _ => vec![fallback.to_string()],
    }
}
