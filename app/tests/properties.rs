//! Property tests for routing, transitions and pagination
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use conduit_app::route::normalize;
use conduit_app::state::Alert;
use conduit_app::views::{MAX_PAGE_LINKS, pagination};
use conduit_app::{AppAction, AppConfig, AppEnvironment, AppReducer, AppState, Route};
use conduit_core::environment::MemoryLocation;
use conduit_core::reducer::Reducer;
use conduit_testing::properties::{list_size, location, unknown_path};
use conduit_testing::{MemoryStorage, MockConduitApi};
use proptest::prelude::*;
use std::sync::Arc;

fn env() -> AppEnvironment<MockConduitApi> {
    AppEnvironment::new(
        MockConduitApi::new(),
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryLocation::default()),
        AppConfig::default().with_page_size(10),
    )
}

proptest! {
    #[test]
    fn unknown_paths_route_home(path in unknown_path()) {
        prop_assert_eq!(Route::parse(&path), Route::Home);
    }

    #[test]
    fn normalizing_is_idempotent(location in location()) {
        let once = normalize(&location);
        prop_assert!(once.starts_with('/'));
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn canonical_paths_parse_back_to_the_same_route(location in location()) {
        let route = Route::parse(&location);
        prop_assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn every_transition_resets_offset_and_alert(location in location()) {
        let mut state = AppState::new(10);
        state.view.page_offset = 30;
        state.generation = 7;
        state.alert = Some(Alert { id: 1, message: "Failed to follow user".into() });

        let _effects = AppReducer::new().reduce(
            &mut state,
            AppAction::LocationChanged { location: location.clone() },
            &env(),
        );

        prop_assert_eq!(state.view.page_offset, 0);
        prop_assert_eq!(state.alert, None);
        prop_assert!(state.generation > 7);
        if Route::parse(&location).requires_auth() {
            prop_assert_eq!(state.route, Route::Login);
        } else {
            prop_assert_eq!(state.route, Route::parse(&location));
        }
    }

    #[test]
    fn pages_cover_every_article((count, size) in list_size()) {
        let links = pagination(count, size, 0);
        let pages = count.div_ceil(size);

        if pages <= 1 {
            prop_assert!(links.is_empty());
        } else {
            prop_assert_eq!(links.len() as u64, pages.min(MAX_PAGE_LINKS));
            prop_assert!(links.iter().all(|link| link.offset < count));
            prop_assert!(links.iter().enumerate().all(|(i, link)| link.offset == i as u64 * size));
            prop_assert_eq!(links.iter().filter(|link| link.active).count(), 1);
        }
    }
}
