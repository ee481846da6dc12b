//! Route transitions
//!
//! Every location change runs the same sequence: record the location, reset
//! the list offset, bump the render generation, clear the alert, apply the
//! auth guard, then enter the page for the new route.

use super::{Effects, pages};
use crate::environment::AppEnvironment;
use crate::route::{self, Route};
use crate::state::AppState;
use conduit_api::ConduitApi;

/// Where the auth guard sends anonymous visitors
pub const LOGIN_PATH: &str = "/login";

/// Transition to `location` without touching the location bar
pub fn transition<C: ConduitApi>(
    state: &mut AppState,
    location: &str,
    env: &AppEnvironment<C>,
) -> Effects {
    let path = route::normalize(location);
    let route = Route::parse(&path);

    state.location = path;
    state.route = route.clone();
    state.view.page_offset = 0;
    state.generation += 1;
    state.alert = None;

    tracing::debug!(%route, generation = state.generation, "Route transition");

    if route.requires_auth() && !state.session.is_authenticated() {
        tracing::info!(%route, "Route requires a session, redirecting to login");
        return navigate(state, LOGIN_PATH, env);
    }

    pages::enter(state, route, env)
}

/// Write `path` to the location bar, then transition
///
/// Transitions even when `path` is already the current location.
pub fn navigate<C: ConduitApi>(state: &mut AppState, path: &str, env: &AppEnvironment<C>) -> Effects {
    env.location().set(path);
    transition(state, path, env)
}

/// Re-render the current route in place
///
/// Same as a transition to the current location, minus the location write.
pub fn rerender<C: ConduitApi>(state: &mut AppState, env: &AppEnvironment<C>) -> Effects {
    let location = state.location.clone();
    transition(state, &location, env)
}

/// Redirect to the login page unless a session exists
///
/// Returns the redirect's effects when there is no session.
pub fn require_session<C: ConduitApi>(
    state: &mut AppState,
    env: &AppEnvironment<C>,
) -> Option<Effects> {
    if state.session.is_authenticated() {
        None
    } else {
        Some(navigate(state, LOGIN_PATH, env))
    }
}
