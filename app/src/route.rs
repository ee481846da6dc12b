//! Location parsing
//!
//! A location is the routing part of the location bar: `#/article/dragons`,
//! `/article/dragons` and `/article/dragons?ref=feed` all name the same
//! route. Anything unrecognised is the home page; routing never fails.

use std::fmt;

/// Which article list a profile page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    /// Articles written by the profile owner
    #[default]
    My,
    /// Articles the profile owner favorited
    Favorites,
}

/// A parsed location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`
    #[default]
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/settings`
    Settings,
    /// `/editor`
    NewArticle,
    /// `/editor/{slug}`
    EditArticle {
        /// Article being edited
        slug: String,
    },
    /// `/article/{slug}`
    Article {
        /// Article shown
        slug: String,
    },
    /// `/profile/{username}` and `/profile/{username}/favorites`
    Profile {
        /// Profile owner
        username: String,
        /// Selected list
        tab: ProfileTab,
    },
}

/// Strip `#`, a query or fragment suffix, and make the path absolute
#[must_use]
pub fn normalize(location: &str) -> String {
    let location = location.trim();
    let location = location.strip_prefix('#').unwrap_or(location);
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

impl Route {
    /// Parse a location string; unmatched locations resolve to [`Route::Home`]
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let path = normalize(location);

        match path.as_str() {
            "/" => return Self::Home,
            "/login" => return Self::Login,
            "/register" => return Self::Register,
            "/settings" => return Self::Settings,
            "/editor" => return Self::NewArticle,
            _ => {},
        }

        if let Some(slug) = path.strip_prefix("/editor/") {
            return single_segment(slug)
                .map_or(Self::Home, |slug| Self::EditArticle { slug });
        }

        if let Some(slug) = path.strip_prefix("/article/") {
            return single_segment(slug).map_or(Self::Home, |slug| Self::Article { slug });
        }

        if let Some(rest) = path.strip_prefix("/profile/") {
            let mut parts = rest.split('/');
            let username = parts.next().unwrap_or_default();
            if username.is_empty() {
                return Self::Home;
            }
            let tab = if parts.next() == Some("favorites") {
                ProfileTab::Favorites
            } else {
                ProfileTab::My
            };
            return Self::Profile {
                username: username.to_string(),
                tab,
            };
        }

        Self::Home
    }

    /// Whether the route needs an authenticated session
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Settings | Self::NewArticle | Self::EditArticle { .. })
    }

    /// Canonical path for this route
    #[must_use]
    pub fn path(&self) -> String {
        self.to_string()
    }
}

/// `"slug"` and `"slug/"` are one segment; `""` and `"a/b"` are not
fn single_segment(rest: &str) -> Option<String> {
    let segment = rest.strip_suffix('/').unwrap_or(rest);
    if segment.is_empty() || segment.contains('/') {
        None
    } else {
        Some(segment.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Login => write!(f, "/login"),
            Self::Register => write!(f, "/register"),
            Self::Settings => write!(f, "/settings"),
            Self::NewArticle => write!(f, "/editor"),
            Self::EditArticle { slug } => write!(f, "/editor/{slug}"),
            Self::Article { slug } => write!(f, "/article/{slug}"),
            Self::Profile {
                username,
                tab: ProfileTab::My,
            } => write!(f, "/profile/{username}"),
            Self::Profile {
                username,
                tab: ProfileTab::Favorites,
            } => write!(f, "/profile/{username}/favorites"),
        }
    }
}
