//! Wire types for the Conduit REST API
//!
//! Field names follow the backend's camelCase JSON. Request payloads are
//! wrapped in a single-key envelope (`{"user": {...}}`, `{"article": {...}}`)
//! exactly as the server expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user, including the bearer token
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique username
    pub username: String,
    /// Email address
    pub email: String,
    /// Short bio
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// A public profile as seen by the current viewer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique username
    pub username: String,
    /// Short bio
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the viewer follows this profile
    #[serde(default)]
    pub following: bool,
}

/// An article
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique slug, derived from the title by the server
    pub slug: String,
    /// Title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Markdown body; absent from list responses
    #[serde(default)]
    pub body: String,
    /// Tags in author order
    #[serde(default)]
    pub tag_list: Vec<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the viewer favorited this article
    #[serde(default)]
    pub favorited: bool,
    /// Number of users who favorited this article
    #[serde(default)]
    pub favorites_count: u64,
    /// Author profile
    pub author: Profile,
}

/// A comment on an article
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique id
    pub id: u64,
    /// Comment text
    pub body: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Author profile
    pub author: Profile,
}

/// One page of articles plus the total count across all pages
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleList {
    /// Articles on this page
    pub articles: Vec<Article>,
    /// Total number of matching articles
    pub articles_count: u64,
}

/// Filters for the article list endpoint
///
/// Serializes to `limit=&offset=&tag=&author=&favorited=`, skipping unset
/// filters.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Page size
    pub limit: u64,
    /// Number of articles to skip
    pub offset: u64,
    /// Only articles carrying this tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Only articles written by this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Only articles favorited by this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited: Option<String>,
}

impl ArticleQuery {
    /// A page of the unfiltered list
    #[must_use]
    pub const fn page(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            tag: None,
            author: None,
            favorited: None,
        }
    }

    /// Filter by tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Filter by author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Filter by the user who favorited
    #[must_use]
    pub fn with_favorited(mut self, username: impl Into<String>) -> Self {
        self.favorited = Some(username.into());
        self
    }

    /// Encode as a query string (without the leading `?`)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        // Only strings and integers are serialized, which cannot fail.
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

/// Login credentials
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct LoginUser {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Registration payload
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct NewUser {
    /// Desired username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Partial update of the current user; unset fields are left untouched
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    /// New email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New bio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// Passwords and tokens never reach logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("bio", &self.bio)
            .field("image", &self.image)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPatch")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("bio", &self.bio)
            .field("image", &self.image)
            .finish()
    }
}

/// Article create/update payload
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    /// Title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Markdown body
    pub body: String,
    /// Tags
    pub tag_list: Vec<String>,
}

impl ArticleDraft {
    /// Prefill a draft from an existing article
    #[must_use]
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            body: article.body.clone(),
            tag_list: article.tag_list.clone(),
        }
    }

    /// Parse the editor's comma separated tag field
    ///
    /// Splits on `,`, trims, drops empty entries.
    #[must_use]
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Comment payload
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewComment {
    /// Comment text
    pub body: String,
}

/// `{"user": ...}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    /// Wrapped user payload
    pub user: T,
}

/// `{"article": ...}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticleEnvelope<T> {
    /// Wrapped article payload
    pub article: T,
}

/// `{"comment": ...}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentEnvelope<T> {
    /// Wrapped comment payload
    pub comment: T,
}

/// `{"comments": [...]}`
#[derive(Clone, Debug, Deserialize)]
pub struct CommentsEnvelope {
    /// Comments, newest first
    pub comments: Vec<Comment>,
}

/// `{"profile": ...}`
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileEnvelope {
    /// Wrapped profile
    pub profile: Profile,
}

/// `{"tags": [...]}`
#[derive(Clone, Debug, Deserialize)]
pub struct TagsEnvelope {
    /// All known tags
    pub tags: Vec<String>,
}
