//! Reducer-level checks that need exact control over state and effects
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use conduit_api::{ApiError, LoginUser};
use conduit_app::state::{Alert, HomePage, Loadable, Page};
use conduit_app::{AppAction, AppConfig, AppEnvironment, AppReducer, AppState, Route};
use conduit_core::environment::MemoryLocation;
use conduit_testing::reducer_test::assertions::{
    assert_no_effects, count_future_effects, delayed_action,
};
use conduit_testing::{MemoryStorage, MockConduitApi, ReducerTest};
use std::sync::Arc;
use std::time::Duration;

fn env() -> AppEnvironment<MockConduitApi> {
    AppEnvironment::new(
        MockConduitApi::new(),
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryLocation::default()),
        AppConfig::default()
            .with_page_size(10)
            .with_alert_ttl(Duration::from_secs(3)),
    )
}

fn home_state(generation: u64) -> AppState {
    let mut state = AppState::new(10);
    state.generation = generation;
    state.page = Page::Home(HomePage::default());
    state
}

fn home_list(state: &AppState) -> &Loadable<conduit_api::ArticleList> {
    match &state.page {
        Page::Home(home) => &home.list,
        other => panic!("expected home, got {other:?}"),
    }
}

#[test]
fn unknown_location_loads_tags_and_list() {
    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(AppState::new(10))
        .when_action(AppAction::LocationChanged {
            location: "/nowhere".into(),
        })
        .then_state(|state| {
            assert_eq!(state.route, Route::Home);
            assert_eq!(state.location, "/nowhere");
            assert_eq!(state.generation, 1);
            assert_eq!(*home_list(state), Loadable::Loading);
        })
        .then_effects(|effects| assert_eq!(count_future_effects(effects), 2))
        .run();
}

#[test]
fn results_from_an_older_generation_are_dropped() {
    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(home_state(5))
        .when_action(AppAction::ListLoaded {
            generation: 4,
            offset: 0,
            result: Ok(conduit_api::ArticleList {
                articles: vec![],
                articles_count: 0,
            }),
        })
        .then_state(|state| assert_eq!(*home_list(state), Loadable::Loading))
        .then_effects(assert_no_effects)
        .run();
}

#[test]
fn list_pages_for_another_offset_are_dropped() {
    let mut state = home_state(3);
    state.view.page_offset = 10;

    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(state)
        .when_action(AppAction::ListLoaded {
            generation: 3,
            offset: 0,
            result: Ok(conduit_api::ArticleList {
                articles: vec![],
                articles_count: 0,
            }),
        })
        .then_state(|state| assert_eq!(*home_list(state), Loadable::Loading))
        .run();
}

#[test]
fn session_requests_wait_for_the_one_in_flight() {
    let mut state = AppState::new(10);
    state.page = Page::Login { errors: vec![] };
    state.session.pending = true;

    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(state)
        .when_action(AppAction::Login {
            credentials: LoginUser {
                email: "alice@conduit.test".into(),
                password: "secret".into(),
            },
        })
        .then_state(|state| assert!(state.session.pending))
        .then_effects(assert_no_effects)
        .run();
}

#[test]
fn failures_raise_an_alert_with_a_dismiss_timer() {
    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(home_state(2))
        .when_action(AppAction::FavoriteToggled {
            generation: 2,
            result: Err(ApiError::Api {
                status: 500,
                errors: None,
            }),
        })
        .then_state(|state| {
            assert_eq!(
                state.alert,
                Some(Alert {
                    id: 1,
                    message: "Failed to favorite article".into()
                })
            );
        })
        .then_effects(|effects| {
            assert_eq!(
                delayed_action(effects),
                Some(&AppAction::DismissAlert { id: 1 })
            );
        })
        .run();
}

#[test]
fn an_old_timer_does_not_dismiss_a_newer_alert() {
    let mut state = home_state(2);
    state.last_alert_id = 2;
    state.alert = Some(Alert {
        id: 2,
        message: "Failed to follow user".into(),
    });

    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(state.clone())
        .when_action(AppAction::DismissAlert { id: 1 })
        .then_state(|state| assert!(state.alert.is_some()))
        .run();

    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(state)
        .when_action(AppAction::DismissAlert { id: 2 })
        .then_state(|state| assert_eq!(state.alert, None))
        .run();
}

#[test]
fn blank_comments_are_ignored() {
    let mut state = AppState::new(10);
    state.session.token = Some("token-alice".into());

    ReducerTest::new(AppReducer::new())
        .with_env(env())
        .given_state(state)
        .when_action(AppAction::PostComment {
            slug: "dragons".into(),
            body: "   \n".into(),
        })
        .then_effects(assert_no_effects)
        .run();
}
