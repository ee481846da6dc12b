//! Shared harness: a real store over the in-memory backend

#![allow(dead_code)] // Each test binary uses a different subset
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use conduit_app::shell::{Command, Shell};
use conduit_app::views::{self, Screen};
use conduit_app::{AppAction, AppConfig, AppState, AppStore, app_store};
use conduit_core::environment::{LocationBar, MemoryLocation};
use conduit_testing::{FIXTURE_PASSWORD, MemoryStorage, MockConduitApi};
use std::sync::Arc;
use std::time::Duration;

/// Alert lifetime used by the harness
pub const ALERT_TTL: Duration = Duration::from_millis(40);

pub struct Harness {
    pub api: MockConduitApi,
    pub storage: MemoryStorage,
    pub location: MemoryLocation,
    pub shell: Shell<MockConduitApi>,
}

impl Harness {
    pub fn new(api: MockConduitApi) -> Self {
        Self::with_storage(api, MemoryStorage::new())
    }

    pub fn with_storage(api: MockConduitApi, storage: MemoryStorage) -> Self {
        let location = MemoryLocation::default();
        let config = AppConfig::default()
            .with_page_size(10)
            .with_alert_ttl(ALERT_TTL);
        let store = app_store(
            api.clone(),
            Arc::new(storage.clone()),
            Arc::new(location.clone()),
            config,
        );
        Self {
            api,
            storage,
            location,
            shell: Shell::new(store),
        }
    }

    pub fn store(&self) -> &AppStore<MockConduitApi> {
        self.shell.store()
    }

    /// Send an action and wait for every effect it caused
    pub async fn send(&self, action: AppAction) {
        self.shell.dispatch(action).await.expect("store accepts actions");
    }

    /// Simulate the user editing the location bar
    pub async fn visit(&self, location: &str) {
        self.location.set(location);
        self.send(AppAction::LocationChanged {
            location: location.to_string(),
        })
        .await;
    }

    pub async fn state<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        self.store().state(f).await
    }

    pub async fn screen(&self) -> Screen {
        self.store().state(views::screen).await
    }

    pub async fn location(&self) -> String {
        self.state(|state| state.location.clone()).await
    }

    pub async fn press(&self, id: &str) {
        self.shell
            .execute(Command::Press(id.to_string()))
            .await
            .unwrap_or_else(|error| panic!("press {id}: {error}"));
    }

    pub async fn submit(&self, form: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.shell
            .execute(Command::Submit {
                form: form.to_string(),
                fields,
            })
            .await
            .unwrap_or_else(|error| panic!("submit {form}: {error}"));
    }

    /// Log in through the login form as a fixture user
    pub async fn login_as(&self, username: &str) {
        self.visit("/login").await;
        self.submit(
            "form-login",
            &[
                ("email", &format!("{username}@conduit.test")),
                ("password", FIXTURE_PASSWORD),
            ],
        )
        .await;
        assert_eq!(
            self.state(|state| state.session.username().map(String::from))
                .await
                .as_deref(),
            Some(username),
            "login as {username} failed"
        );
    }
}
