//! View models
//!
//! [`screen`] turns the state into what a page shows: the navigation bar,
//! the alert, a typed page body and every interactive control on it. A
//! control's [`Intent`] says what activating it does, so front ends never
//! wire handlers of their own.

pub mod forms;
pub mod pages;
pub mod pagination;

use crate::actions::AppAction;
use crate::state::AppState;
use chrono::{DateTime, Utc};

pub use forms::{FormKind, submit};
pub use pages::{
    ArticlePreview, ArticleView, Body, CommentView, FormView, HomeView, ListView, ProfileView,
    TabView,
};
pub use pagination::{MAX_PAGE_LINKS, PageLink, pagination};

/// Avatar shown for users without an image
pub const DEFAULT_IMAGE: &str = "https://api.realworld.io/images/smiley-cyrus.jpg";

/// Everything one page shows
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Navigation bar
    pub nav: Vec<NavItem>,
    /// Transient alert text
    pub alert: Option<String>,
    /// Page body
    pub body: Body,
    /// Interactive elements, navigation links included
    pub controls: Vec<Control>,
}

impl Screen {
    /// The control with `id`
    #[must_use]
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.id == id)
    }
}

/// A navigation bar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Text shown
    pub label: String,
    /// Target path
    pub path: String,
    /// Whether the link points at the current location
    pub active: bool,
}

/// An interactive element
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Stable identifier (`favorite-how-to-train`, `form-login`, ...)
    pub id: String,
    /// Text shown
    pub label: String,
    /// What activating it does
    pub intent: Intent,
}

impl Control {
    pub(crate) fn navigate(id: impl Into<String>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            intent: Intent::Navigate(path.into()),
        }
    }

    pub(crate) fn dispatch(id: impl Into<String>, label: impl Into<String>, action: AppAction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            intent: Intent::Dispatch(action),
        }
    }

    pub(crate) fn form(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: FormKind,
        fields: Vec<(String, String)>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            intent: Intent::Form { kind, fields },
        }
    }
}

/// What a control does
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Follow a link
    Navigate(String),
    /// Dispatch an action
    Dispatch(AppAction),
    /// Submit a form; the action is built from the field values
    Form {
        /// Which form
        kind: FormKind,
        /// Field names with their prefilled values
        fields: Vec<(String, String)>,
    },
}

/// Format a timestamp as `January 5, 2025`
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// An image URL, or the default avatar
#[must_use]
pub fn image_or_default(image: Option<&str>) -> String {
    match image {
        Some(image) if !image.is_empty() => image.to_string(),
        _ => DEFAULT_IMAGE.to_string(),
    }
}

/// Navigation bar for the current session and location
#[must_use]
pub fn nav(state: &AppState) -> Vec<NavItem> {
    let mut items = vec![("Home".to_string(), "/".to_string())];

    if state.session.is_authenticated() {
        items.push(("New Article".to_string(), "/editor".to_string()));
        items.push(("Settings".to_string(), "/settings".to_string()));
        if let Some(username) = state.session.username() {
            items.push((username.to_string(), format!("/profile/{username}")));
        }
    } else {
        items.push(("Sign in".to_string(), "/login".to_string()));
        items.push(("Sign up".to_string(), "/register".to_string()));
    }

    items
        .into_iter()
        .map(|(label, path)| {
            let active = if path.starts_with("/profile/") {
                state.location == path || state.location.starts_with(&format!("{path}/"))
            } else {
                state.location == path
            };
            NavItem {
                label,
                path,
                active,
            }
        })
        .collect()
}

/// Control id for a navigation link
fn nav_id(path: &str) -> &'static str {
    match path {
        "/" => "nav-home",
        "/login" => "nav-login",
        "/register" => "nav-register",
        "/editor" => "nav-editor",
        "/settings" => "nav-settings",
        _ => "nav-profile",
    }
}

/// Build the screen for the current state
#[must_use]
pub fn screen(state: &AppState) -> Screen {
    let nav = nav(state);
    let mut controls: Vec<Control> = nav
        .iter()
        .map(|item| Control::navigate(nav_id(&item.path), item.label.clone(), item.path.clone()))
        .collect();

    let body = pages::body(state, &mut controls);

    Screen {
        nav,
        alert: state.alert.as_ref().map(|alert| alert.message.clone()),
        body,
        controls,
    }
}
