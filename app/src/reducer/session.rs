//! Session reducer
//!
//! Owns the token and the current user. Login, register and settings
//! updates share one in-flight slot: while a request is pending, further
//! session requests are ignored.

use super::{ApiMarker, Effects, form_errors, navigation};
use crate::actions::{AppAction, SessionRequest};
use crate::effects;
use crate::environment::AppEnvironment;
use crate::state::{AppState, FeedTab, Page, TOKEN_KEY};
use conduit_api::ConduitApi;
use conduit_api::types::User;
use conduit_core::{SmallVec, reducer::Reducer, smallvec};

/// Reducer for the authenticated identity
#[derive(Debug)]
pub struct SessionReducer<C> {
    _api: ApiMarker<C>,
}

impl<C> SessionReducer<C> {
    /// Create the session reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _api: std::marker::PhantomData,
        }
    }
}

impl<C> Default for SessionReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forget the session, clear storage and go home
pub fn logout<C: ConduitApi>(state: &mut AppState, env: &AppEnvironment<C>) -> Effects {
    state.session.token = None;
    state.session.user = None;
    state.session.pending = false;
    state.view.tab = FeedTab::Global;

    if let Err(error) = env.storage().remove(TOKEN_KEY) {
        tracing::warn!(%error, "Failed to clear stored token");
    }

    tracing::info!("Logged out");
    navigation::navigate(state, "/", env)
}

/// Begin a login, register or settings request unless one is in flight
fn begin_request(state: &mut AppState, request: SessionRequest) -> bool {
    if state.session.pending {
        tracing::debug!(?request, "Session request already in flight, ignoring");
        return false;
    }
    state.session.pending = true;
    if let Some(errors) = state.page.form_errors_mut() {
        errors.clear();
    }
    true
}

/// Adopt the user returned by a successful session request
fn accept_user<C: ConduitApi>(state: &mut AppState, user: User, env: &AppEnvironment<C>) {
    if let Err(error) = env.storage().set(TOKEN_KEY, &user.token) {
        tracing::warn!(%error, "Failed to persist token");
    }
    state.session.token = Some(user.token.clone());
    state.session.user = Some(user);
}

impl<C: ConduitApi> Reducer for SessionReducer<C> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<C>;

    #[allow(clippy::too_many_lines)] // One arm per session action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Start: restore the stored token, then route
            // ═══════════════════════════════════════════════════════════════
            AppAction::Start => match env.storage().get(TOKEN_KEY) {
                Some(token) => {
                    tracing::info!("Restoring stored session");
                    state.session.token = Some(token.clone());
                    let client = env.client(&state.session);
                    smallvec![effects::current_user(client, token, true)]
                },
                None => {
                    let location = env.location().current();
                    navigation::transition(state, &location, env)
                },
            },

            // ═══════════════════════════════════════════════════════════════
            // RefreshCurrentUser: no-op without a token
            // ═══════════════════════════════════════════════════════════════
            AppAction::RefreshCurrentUser => {
                let Some(token) = state.session.token.clone() else {
                    return SmallVec::new();
                };
                let client = env.client(&state.session);
                smallvec![effects::current_user(client, token, false)]
            },

            // ═══════════════════════════════════════════════════════════════
            // CurrentUserLoaded: any rejection ends the session
            // ═══════════════════════════════════════════════════════════════
            AppAction::CurrentUserLoaded {
                token,
                route_after,
                result,
            } => {
                if state.session.token.as_deref() != Some(token.as_str()) {
                    tracing::debug!("Discarding current user for a replaced token");
                    if route_after && state.page == Page::Blank {
                        let location = env.location().current();
                        return navigation::transition(state, &location, env);
                    }
                    return SmallVec::new();
                }

                match result {
                    Ok(user) => {
                        tracing::debug!(username = %user.username, "Current user refreshed");
                        state.session.user = Some(user);
                        if route_after {
                            let location = env.location().current();
                            navigation::transition(state, &location, env)
                        } else {
                            SmallVec::new()
                        }
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Stored token rejected, logging out");
                        logout(state, env)
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Login / Register / UpdateSettings
            // ═══════════════════════════════════════════════════════════════
            AppAction::Login { credentials } => {
                if !begin_request(state, SessionRequest::Login) {
                    return SmallVec::new();
                }
                let client = env.client(&state.session);
                smallvec![effects::login(client, credentials)]
            },

            AppAction::Register { user } => {
                if !begin_request(state, SessionRequest::Register) {
                    return SmallVec::new();
                }
                let client = env.client(&state.session);
                smallvec![effects::register(client, user)]
            },

            AppAction::UpdateSettings { mut patch } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                if !begin_request(state, SessionRequest::Update) {
                    return SmallVec::new();
                }
                if patch.password.as_deref().is_some_and(str::is_empty) {
                    patch.password = None;
                }
                let client = env.client(&state.session);
                smallvec![effects::update_user(client, patch)]
            },

            AppAction::SessionResponse { request, result } => {
                state.session.pending = false;
                match result {
                    Ok(user) => {
                        tracing::info!(username = %user.username, ?request, "Session updated");
                        let target = match request {
                            SessionRequest::Login | SessionRequest::Register => "/".to_string(),
                            SessionRequest::Update => format!("/profile/{}", user.username),
                        };
                        accept_user(state, user, env);
                        navigation::navigate(state, &target, env)
                    },
                    Err(error) => {
                        tracing::warn!(%error, ?request, "Session request failed");
                        if let Some(errors) = state.page.form_errors_mut() {
                            *errors = form_errors(&error, request.fallback_error());
                        }
                        SmallVec::new()
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Logout
            // ═══════════════════════════════════════════════════════════════
            AppAction::Logout => logout(state, env),

            _ => SmallVec::new(),
        }
    }
}
