//! # Conduit Testing
//!
//! Testing utilities for the Conduit client.
//!
//! This crate provides:
//! - Mock implementations of the environment's collaborators
//! - The [`ReducerTest`] Given-When-Then harness
//! - proptest strategies for locations and list sizes
//!
//! ## Example
//!
//! ```ignore
//! use conduit_testing::{MemoryStorage, MockConduitApi};
//!
//! #[tokio::test]
//! async fn unknown_paths_route_home() {
//!     let api = MockConduitApi::new();
//!     let store = app_store(
//!         api.clone(),
//!         Arc::new(MemoryStorage::new()),
//!         Arc::new(MemoryLocation::default()),
//!         AppConfig::default(),
//!     );
//!
//!     store.send(AppAction::LocationChanged { location: "/nowhere".into() }).await?;
//!     store.settle().await;
//!
//!     assert_eq!(store.state(|s| s.route.clone()).await, Route::Home);
//! }
//! ```

pub mod mocks;
pub mod reducer_test;

/// Property-based testing strategies
pub mod properties {
    use proptest::prelude::*;

    /// A single path segment: slug-like, never empty
    pub fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9-]{0,15}"
    }

    /// Location strings the router is expected to understand
    ///
    /// Mixes known prefixes with random segments, optional `#` prefixes and
    /// optional query suffixes.
    pub fn location() -> impl Strategy<Value = String> {
        let known = prop_oneof![
            Just(String::new()),
            Just("/".to_string()),
            Just("/login".to_string()),
            Just("/register".to_string()),
            Just("/settings".to_string()),
            Just("/editor".to_string()),
            segment().prop_map(|slug| format!("/editor/{slug}")),
            segment().prop_map(|slug| format!("/article/{slug}")),
            segment().prop_map(|name| format!("/profile/{name}")),
            segment().prop_map(|name| format!("/profile/{name}/favorites")),
        ];
        let arbitrary = "(/[a-zA-Z0-9_.~-]{0,12}){0,4}";

        (prop_oneof![known, arbitrary], any::<bool>(), any::<bool>()).prop_map(
            |(path, hash, query)| {
                let mut location = if hash { format!("#{path}") } else { path };
                if query {
                    location.push_str("?ref=feed");
                }
                location
            },
        )
    }

    /// Paths that match none of the known route prefixes
    pub fn unknown_path() -> impl Strategy<Value = String> {
        "/[a-z]{1,12}(/[a-z0-9]{1,8}){0,2}".prop_filter("must not be a known route", |path| {
            let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
            !matches!(
                first,
                "login" | "register" | "settings" | "editor" | "article" | "profile"
            )
        })
    }

    /// `(articles_count, page_size)` pairs
    pub fn list_size() -> impl Strategy<Value = (u64, u64)> {
        (0u64..500, 1u64..50)
    }
}

// Re-export commonly used items
pub use mocks::{FIXTURE_PASSWORD, MemoryStorage, MockConduitApi};
pub use reducer_test::ReducerTest;
