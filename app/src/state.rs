//! Application state
//!
//! One owned value holds everything the views read: the session, the view
//! state (tab, offset, page size), the current route and the data loaded for
//! the current page. The store keeps it behind a single lock.

use crate::route::{ProfileTab, Route};
use conduit_api::types::{Article, ArticleDraft, ArticleList, Comment, Profile, User};

/// Durable storage key of the auth token
pub const TOKEN_KEY: &str = "token";

/// The authenticated identity
///
/// A token is present exactly when the client considers itself logged in.
/// The user is only set from a server response that accepted the token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token
    pub token: Option<String>,
    /// Profile of the token's owner
    pub user: Option<User>,
    /// A login, register or settings request is outstanding
    pub pending: bool,
}

impl Session {
    /// Returns `true` when a token is held
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Username of the logged-in user
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// Returns `true` when `username` is the logged-in user
    #[must_use]
    pub fn is_user(&self, username: &str) -> bool {
        self.username() == Some(username)
    }
}

/// Which list the home page shows
///
/// The tag filter only exists inside [`FeedTab::Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedTab {
    /// Every article
    #[default]
    Global,
    /// Articles by followed authors
    Feed,
    /// Articles carrying one tag
    Tag(String),
}

/// UI-level selections that outlive a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Home page list selection
    pub tab: FeedTab,
    /// Offset of the list page shown; reset by every navigation
    pub page_offset: u64,
    /// Articles per list page
    pub page_size: u64,
}

impl ViewState {
    /// Fresh view state for `page_size` articles per page
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            tab: FeedTab::Global,
            page_offset: 0,
            page_size: page_size.max(1),
        }
    }
}

/// Where an article list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// `GET /articles/`
    Global,
    /// `GET /articles/feed/`
    Feed,
    /// `GET /articles/?tag=`
    Tag(String),
    /// `GET /articles/?author=`
    Author(String),
    /// `GET /articles/?favorited=`
    Favorited(String),
}

/// Data that arrives asynchronously
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    /// Request in flight
    #[default]
    Loading,
    /// Request succeeded
    Ready(T),
    /// Request failed
    Failed,
}

impl<T> Loadable<T> {
    /// Mutable access to the loaded value
    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// An article together with its comments (newest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    /// The article, body included
    pub article: Article,
    /// Comments, newest first
    pub comments: Vec<Comment>,
}

/// Home page data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomePage {
    /// Tag cloud; `None` while loading
    pub tags: Option<Vec<String>>,
    /// Article list region
    pub list: Loadable<ArticleList>,
}

/// Editor page data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPage {
    /// `Some` when editing an existing article
    pub slug: Option<String>,
    /// Form contents; `None` while the existing article loads
    pub draft: Option<ArticleDraft>,
    /// Form error lines
    pub errors: Vec<String>,
}

/// Article page data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    /// Requested slug
    pub slug: String,
    /// Article and comments
    pub detail: Loadable<ArticleDetail>,
}

/// Profile page data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    /// Requested username
    pub username: String,
    /// Selected list
    pub tab: ProfileTab,
    /// The profile
    pub profile: Loadable<Profile>,
    /// Article list region; requested once the profile loaded
    pub list: Loadable<ArticleList>,
}

/// The page currently shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    /// Nothing routed yet
    #[default]
    Blank,
    /// `/`
    Home(HomePage),
    /// `/login`; holds form error lines
    Login {
        /// Form error lines
        errors: Vec<String>,
    },
    /// `/register`
    Register {
        /// Form error lines
        errors: Vec<String>,
    },
    /// `/settings`
    Settings {
        /// Form error lines
        errors: Vec<String>,
    },
    /// `/editor` and `/editor/{slug}`
    Editor(EditorPage),
    /// `/article/{slug}`
    Article(ArticlePage),
    /// `/profile/{username}`
    Profile(ProfilePage),
}

impl Page {
    /// The article list region, for pages that have one
    pub fn list_mut(&mut self) -> Option<&mut Loadable<ArticleList>> {
        match self {
            Self::Home(home) => Some(&mut home.list),
            Self::Profile(profile) => Some(&mut profile.list),
            _ => None,
        }
    }

    /// Form error lines, for pages with a form
    pub fn form_errors_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Login { errors } | Self::Register { errors } | Self::Settings { errors } => {
                Some(errors)
            },
            Self::Editor(editor) => Some(&mut editor.errors),
            _ => None,
        }
    }
}

/// A transient message shown above the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Identifies the timer that may dismiss it
    pub id: u64,
    /// Text shown
    pub message: String,
}

/// Everything the client knows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Authenticated identity
    pub session: Session,
    /// Tab, offset and page size
    pub view: ViewState,
    /// Location last routed
    pub location: String,
    /// Route parsed from `location`
    pub route: Route,
    /// Bumped by every transition and full re-render; async page results
    /// carrying an older value are discarded
    pub generation: u64,
    /// Data for the current page
    pub page: Page,
    /// Transient alert
    pub alert: Option<Alert>,
    /// Last alert id handed out
    pub last_alert_id: u64,
}

impl AppState {
    /// Fresh state for `page_size` articles per page
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            session: Session::default(),
            view: ViewState::new(page_size),
            location: "/".to_string(),
            route: Route::Home,
            generation: 0,
            page: Page::Blank,
            alert: None,
            last_alert_id: 0,
        }
    }

    /// Where the current page's article list comes from
    #[must_use]
    pub fn list_source(&self) -> Option<ListSource> {
        match &self.page {
            Page::Home(_) => Some(match &self.view.tab {
                FeedTab::Global => ListSource::Global,
                FeedTab::Feed => ListSource::Feed,
                FeedTab::Tag(tag) => ListSource::Tag(tag.clone()),
            }),
            Page::Profile(profile) => Some(match profile.tab {
                ProfileTab::My => ListSource::Author(profile.username.clone()),
                ProfileTab::Favorites => ListSource::Favorited(profile.username.clone()),
            }),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}
