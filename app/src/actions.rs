//! Actions
//!
//! Inputs from the outside world (location changes, user intents) and the
//! results of effects. Results of page requests carry the render generation
//! they were issued under.

use crate::state::{ArticleDetail, FeedTab};
use conduit_api::ApiError;
use conduit_api::types::{
    Article, ArticleDraft, ArticleList, Comment, LoginUser, NewUser, Profile, User, UserPatch,
};

/// Which session request a response answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    /// `POST /users/login/`
    Login,
    /// `POST /users/`
    Register,
    /// `PUT /user/`
    Update,
}

impl SessionRequest {
    /// Form error shown when the server gave no field messages
    #[must_use]
    pub const fn fallback_error(self) -> &'static str {
        match self {
            Self::Login => "error Invalid credentials",
            Self::Register => "error Registration failed",
            Self::Update => "error Update failed",
        }
    }
}

/// Every input the client reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // ===== Lifecycle =====
    /// Restore the session from storage, then route the current location
    Start,

    // ===== Session =====
    /// Sign in
    Login {
        /// Email and password
        credentials: LoginUser,
    },
    /// Sign up
    Register {
        /// Username, email and password
        user: NewUser,
    },
    /// Update the current user
    UpdateSettings {
        /// Fields to change
        patch: UserPatch,
    },
    /// Re-fetch the current user with the held token
    RefreshCurrentUser,
    /// Forget the session and go home
    Logout,
    /// Response to a login, register or settings request
    SessionResponse {
        /// Request answered
        request: SessionRequest,
        /// The user, token included
        result: Result<User, ApiError>,
    },
    /// Response to `GET /user/`
    CurrentUserLoaded {
        /// Token the request was sent with
        token: String,
        /// Route the current location afterwards (start-up)
        route_after: bool,
        /// The user
        result: Result<User, ApiError>,
    },

    // ===== Navigation =====
    /// The location bar changed
    LocationChanged {
        /// New location
        location: String,
    },
    /// Programmatic navigation: write the location bar, then transition
    Navigate {
        /// Target path
        path: String,
    },

    // ===== Page loads =====
    /// Tag cloud for the home page
    TagsLoaded {
        /// Render generation of the request
        generation: u64,
        /// Tags
        result: Result<Vec<String>, ApiError>,
    },
    /// An article list page
    ListLoaded {
        /// Render generation of the request
        generation: u64,
        /// Offset the page was requested at
        offset: u64,
        /// The page
        result: Result<ArticleList, ApiError>,
    },
    /// Article page content
    ArticleLoaded {
        /// Render generation of the request
        generation: u64,
        /// Article and comments
        result: Result<ArticleDetail, ApiError>,
    },
    /// Article to prefill the editor with
    EditorArticleLoaded {
        /// Render generation of the request
        generation: u64,
        /// The article
        result: Result<Article, ApiError>,
    },
    /// Profile page header
    ProfileLoaded {
        /// Render generation of the request
        generation: u64,
        /// The profile
        result: Result<Profile, ApiError>,
    },

    // ===== Interactions =====
    /// Pick a home page tab (or a tag from the cloud)
    SelectTab {
        /// Tab to show
        tab: FeedTab,
    },
    /// Pick a list page
    SelectPage {
        /// Offset of the page
        offset: u64,
    },
    /// Favorite or unfavorite an article
    ToggleFavorite {
        /// Article
        slug: String,
        /// Current flag; `true` unfavorites
        favorited: bool,
    },
    /// Response to a favorite toggle
    FavoriteToggled {
        /// Render generation of the request
        generation: u64,
        /// Updated article
        result: Result<Article, ApiError>,
    },
    /// Follow or unfollow a user
    ToggleFollow {
        /// User
        username: String,
        /// Current flag; `true` unfollows
        following: bool,
    },
    /// Response to a follow toggle
    FollowToggled {
        /// Render generation of the request
        generation: u64,
        /// Updated profile
        result: Result<Profile, ApiError>,
    },
    /// Publish the editor's draft
    PublishArticle {
        /// Draft to create or update
        draft: ArticleDraft,
    },
    /// Response to a publish
    ArticlePublished {
        /// Render generation of the request
        generation: u64,
        /// Stored article
        result: Result<Article, ApiError>,
    },
    /// Delete an article
    DeleteArticle {
        /// Article
        slug: String,
    },
    /// Response to an article deletion
    ArticleDeleted {
        /// Render generation of the request
        generation: u64,
        /// Outcome
        result: Result<(), ApiError>,
    },
    /// Comment on an article
    PostComment {
        /// Article
        slug: String,
        /// Comment text
        body: String,
    },
    /// Response to a comment post
    CommentPosted {
        /// Render generation of the request
        generation: u64,
        /// Stored comment
        result: Result<Comment, ApiError>,
    },
    /// Delete a comment
    DeleteComment {
        /// Article
        slug: String,
        /// Comment
        id: u64,
    },
    /// Response to a comment deletion
    CommentDeleted {
        /// Render generation of the request
        generation: u64,
        /// Comment
        id: u64,
        /// Outcome
        result: Result<(), ApiError>,
    },
    /// Alert timer fired
    DismissAlert {
        /// Alert the timer belongs to
        id: u64,
    },
}
