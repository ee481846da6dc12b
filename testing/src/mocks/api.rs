//! In-memory Conduit backend
//!
//! [`MockConduitApi`] behaves like the real server closely enough for the
//! client's flows: token authentication, viewer-specific `favorited` and
//! `following` flags, filtering, pagination and field-keyed validation
//! errors. Every call is logged as `"METHOD /path/?query"` using the same
//! path builders as the HTTP client, so tests can assert on requests exactly
//! as they would appear on the wire.

use chrono::{DateTime, Duration, Utc};
use conduit_api::error::{ApiError, Result, ValidationErrors};
use conduit_api::paths;
use conduit_api::types::{
    Article, ArticleDraft, ArticleList, ArticleQuery, Comment, LoginUser, NewUser, Profile, User,
    UserPatch,
};
use conduit_api::ConduitApi;
use std::collections::{BTreeSet, HashMap};
use std::future::{Future, ready};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Password given to accounts created with [`MockConduitApi::with_user`]
pub const FIXTURE_PASSWORD: &str = "password123";

/// 2025-01-05T12:00:00Z; fixture timestamps count minutes from here
const EPOCH_SECONDS: i64 = 1_736_078_400;

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug)]
struct StoredArticle {
    article: Article,
    favorited_by: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct Backend {
    accounts: Vec<Account>,
    /// Oldest first
    articles: Vec<StoredArticle>,
    /// Per slug, oldest first
    comments: HashMap<String, Vec<Comment>>,
    /// `(follower, followee)`
    follows: BTreeSet<(String, String)>,
    next_comment_id: u64,
    ticks: i64,
    calls: Vec<String>,
    failures: Vec<(String, ApiError)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Auth {
    Optional,
    Required,
}

fn status(status: u16) -> ApiError {
    ApiError::Api {
        status,
        errors: None,
    }
}

fn not_found() -> ApiError {
    ApiError::Api {
        status: 404,
        errors: Some(ValidationErrors::from_pairs([("detail", "Not found.")])),
    }
}

fn invalid(field: &str, message: &str) -> ApiError {
    ApiError::Api {
        status: 422,
        errors: Some(ValidationErrors::from_pairs([(field, message)])),
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

impl Backend {
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::from_timestamp(EPOCH_SECONDS, 0).unwrap_or_default() + Duration::minutes(self.ticks)
    }

    fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.user.username == username)
    }

    fn profile(&self, username: &str, viewer: Option<&str>) -> Option<Profile> {
        self.account(username).map(|account| Profile {
            username: account.user.username.clone(),
            bio: account.user.bio.clone(),
            image: account.user.image.clone(),
            following: viewer.is_some_and(|viewer| {
                self.follows
                    .contains(&(viewer.to_string(), username.to_string()))
            }),
        })
    }

    fn project(&self, stored: &StoredArticle, viewer: Option<&str>) -> Article {
        let mut article = stored.article.clone();
        article.favorited = viewer.is_some_and(|viewer| stored.favorited_by.contains(viewer));
        article.favorites_count = stored.favorited_by.len() as u64;
        if let Some(author) = self.profile(&article.author.username, viewer) {
            article.author = author;
        }
        article
    }

    fn stored(&self, slug: &str) -> Result<&StoredArticle> {
        self.articles
            .iter()
            .find(|stored| stored.article.slug == slug)
            .ok_or_else(not_found)
    }

    fn stored_mut(&mut self, slug: &str) -> Result<&mut StoredArticle> {
        self.articles
            .iter_mut()
            .find(|stored| stored.article.slug == slug)
            .ok_or_else(not_found)
    }

    fn page<F>(&self, viewer: Option<&str>, limit: u64, offset: u64, keep: F) -> ArticleList
    where
        F: Fn(&StoredArticle) -> bool,
    {
        let matching: Vec<&StoredArticle> = self
            .articles
            .iter()
            .rev()
            .filter(|stored| keep(stored))
            .collect();

        let articles = matching
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|stored| {
                let mut article = self.project(stored, viewer);
                // List responses carry no body.
                article.body = String::new();
                article
            })
            .collect();

        ArticleList {
            articles,
            articles_count: matching.len() as u64,
        }
    }

    fn insert_account(&mut self, username: &str, email: &str, password: &str) -> User {
        let user = User {
            username: username.to_string(),
            email: email.to_string(),
            bio: None,
            image: None,
            token: format!("token-{username}"),
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    fn insert_article(&mut self, author: &str, draft: ArticleDraft) -> Result<Article> {
        if draft.title.trim().is_empty() {
            return Err(invalid("title", "can't be blank"));
        }
        let author = self.profile(author, None).ok_or_else(not_found)?;

        let base = slugify(&draft.title);
        let mut slug = base.clone();
        let mut suffix = 1;
        while self.stored(&slug).is_ok() {
            suffix += 1;
            slug = format!("{base}-{suffix}");
        }

        let now = self.now();
        let article = Article {
            slug,
            title: draft.title,
            description: draft.description,
            body: draft.body,
            tag_list: draft.tag_list,
            created_at: now,
            updated_at: Some(now),
            favorited: false,
            favorites_count: 0,
            author,
        };
        self.articles.push(StoredArticle {
            article: article.clone(),
            favorited_by: BTreeSet::new(),
        });
        Ok(article)
    }

    fn insert_comment(&mut self, slug: &str, author: &str, body: &str) -> Result<Comment> {
        self.stored(slug)?;
        if body.trim().is_empty() {
            return Err(invalid("body", "can't be blank"));
        }
        let author = self.profile(author, None).ok_or_else(not_found)?;

        self.next_comment_id += 1;
        let now = self.now();
        let comment = Comment {
            id: self.next_comment_id,
            body: body.to_string(),
            created_at: now,
            updated_at: Some(now),
            author,
        };
        self.comments
            .entry(slug.to_string())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }
}

/// In-memory implementation of [`ConduitApi`]
///
/// Clones share one backend; [`ConduitApi::with_token`] returns a clone bound
/// to another token, exactly like the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct MockConduitApi {
    backend: Arc<Mutex<Backend>>,
    token: Option<String>,
}

impl MockConduitApi {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the call, apply injected failures and authenticate the viewer
    fn handle<T, F>(&self, method: &str, path: &str, auth: Auth, op: F) -> Result<T>
    where
        F: FnOnce(&mut Backend, Option<&str>) -> Result<T>,
    {
        let mut backend = self.lock();
        let call = format!("{method} {path}");
        backend.calls.push(call.clone());

        if let Some((_, error)) = backend
            .failures
            .iter()
            .find(|(prefix, _)| call.starts_with(prefix.as_str()))
        {
            return Err(error.clone());
        }

        let viewer = match &self.token {
            None => None,
            Some(token) => Some(
                backend
                    .accounts
                    .iter()
                    .find(|account| &account.user.token == token)
                    .map(|account| account.user.username.clone())
                    .ok_or_else(|| status(401))?,
            ),
        };

        if auth == Auth::Required && viewer.is_none() {
            return Err(status(401));
        }

        op(&mut backend, viewer.as_deref())
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    /// Register an account with `{username}@conduit.test` / [`FIXTURE_PASSWORD`]
    pub fn with_user(&self, username: &str) -> User {
        self.lock().insert_account(
            username,
            &format!("{username}@conduit.test"),
            FIXTURE_PASSWORD,
        )
    }

    /// Publish an article as `author`
    ///
    /// # Panics
    ///
    /// Panics if the author does not exist or the title is blank.
    #[allow(clippy::panic)] // Fixture misuse is a test bug
    pub fn with_article(&self, author: &str, title: &str, tags: &[&str]) -> Article {
        let draft = ArticleDraft {
            title: title.to_string(),
            description: format!("About {title}"),
            body: format!("# {title}"),
            tag_list: tags.iter().map(ToString::to_string).collect(),
        };
        match self.lock().insert_article(author, draft) {
            Ok(article) => article,
            Err(error) => panic!("invalid article fixture {title:?}: {error}"),
        }
    }

    /// Publish `count` untagged articles as `author`
    pub fn with_articles(&self, author: &str, count: usize) -> Vec<Article> {
        (1..=count)
            .map(|n| self.with_article(author, &format!("Article {n}"), &[]))
            .collect()
    }

    /// Comment on an article as `author`
    ///
    /// # Panics
    ///
    /// Panics if the article or author does not exist.
    #[allow(clippy::panic)] // Fixture misuse is a test bug
    pub fn with_comment(&self, slug: &str, author: &str, body: &str) -> Comment {
        match self.lock().insert_comment(slug, author, body) {
            Ok(comment) => comment,
            Err(error) => panic!("invalid comment fixture on {slug:?}: {error}"),
        }
    }

    /// Make `follower` follow `followee`
    pub fn with_follow(&self, follower: &str, followee: &str) {
        self.lock()
            .follows
            .insert((follower.to_string(), followee.to_string()));
    }

    /// Make `username` favorite `slug`
    pub fn with_favorite(&self, username: &str, slug: &str) {
        if let Ok(stored) = self.lock().stored_mut(slug) {
            stored.favorited_by.insert(username.to_string());
        }
    }

    /// The token an account authenticates with
    #[must_use]
    pub fn token_for(username: &str) -> String {
        format!("token-{username}")
    }

    /// Fail every call whose `"METHOD /path"` starts with `prefix`
    pub fn fail_on(&self, prefix: &str, error: ApiError) {
        self.lock().failures.push((prefix.to_string(), error));
    }

    /// Remove every injected failure
    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Every call so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Calls starting with `prefix`
    #[must_use]
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Forget logged calls
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Server-side view of an article, as an anonymous reader sees it
    #[must_use]
    pub fn article(&self, slug: &str) -> Option<Article> {
        let backend = self.lock();
        backend
            .stored(slug)
            .ok()
            .map(|stored| backend.project(stored, None))
    }

    /// Whether `follower` follows `followee` on the server
    #[must_use]
    pub fn is_following(&self, follower: &str, followee: &str) -> bool {
        self.lock()
            .follows
            .contains(&(follower.to_string(), followee.to_string()))
    }

    /// Server-side comments on an article, oldest first
    #[must_use]
    pub fn stored_comments(&self, slug: &str) -> Vec<Comment> {
        self.lock().comments.get(slug).cloned().unwrap_or_default()
    }
}

impl ConduitApi for MockConduitApi {
    fn with_token(&self, token: Option<String>) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            token,
        }
    }

    fn login(&self, credentials: LoginUser) -> impl Future<Output = Result<User>> + Send {
        ready(self.handle("POST", paths::LOGIN, Auth::Optional, |backend, _| {
            backend
                .accounts
                .iter()
                .find(|a| a.user.email == credentials.email && a.password == credentials.password)
                .map(|a| a.user.clone())
                .ok_or_else(|| invalid("email or password", "is invalid"))
        }))
    }

    fn register(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send {
        ready(self.handle("POST", paths::USERS, Auth::Optional, |backend, _| {
            if user.username.trim().is_empty() {
                return Err(invalid("username", "can't be blank"));
            }
            if backend.account(&user.username).is_some() {
                return Err(invalid("username", "has already been taken"));
            }
            if backend.accounts.iter().any(|a| a.user.email == user.email) {
                return Err(invalid("email", "has already been taken"));
            }
            Ok(backend.insert_account(&user.username, &user.email, &user.password))
        }))
    }

    fn current_user(&self) -> impl Future<Output = Result<User>> + Send {
        ready(
            self.handle("GET", paths::CURRENT_USER, Auth::Required, |backend, viewer| {
                viewer
                    .and_then(|viewer| backend.account(viewer))
                    .map(|account| account.user.clone())
                    .ok_or_else(|| status(401))
            }),
        )
    }

    fn update_user(&self, patch: UserPatch) -> impl Future<Output = Result<User>> + Send {
        ready(
            self.handle("PUT", paths::CURRENT_USER, Auth::Required, |backend, viewer| {
                let viewer = viewer.unwrap_or_default().to_string();

                if let Some(username) = &patch.username {
                    if username.trim().is_empty() {
                        return Err(invalid("username", "can't be blank"));
                    }
                    if *username != viewer && backend.account(username).is_some() {
                        return Err(invalid("username", "has already been taken"));
                    }
                }

                let account = backend
                    .accounts
                    .iter_mut()
                    .find(|a| a.user.username == viewer)
                    .ok_or_else(|| status(401))?;

                if let Some(email) = patch.email {
                    account.user.email = email;
                }
                if let Some(username) = patch.username {
                    account.user.username = username;
                }
                if let Some(password) = patch.password {
                    account.password = password;
                }
                if let Some(bio) = patch.bio {
                    account.user.bio = Some(bio).filter(|bio| !bio.is_empty());
                }
                if let Some(image) = patch.image {
                    account.user.image = Some(image).filter(|image| !image.is_empty());
                }
                Ok(account.user.clone())
            }),
        )
    }

    fn list_articles(
        &self,
        query: ArticleQuery,
    ) -> impl Future<Output = Result<ArticleList>> + Send {
        let path = paths::article_list(&query);
        ready(self.handle("GET", &path, Auth::Optional, |backend, viewer| {
            Ok(backend.page(viewer, query.limit, query.offset, |stored| {
                let article = &stored.article;
                query
                    .tag
                    .as_ref()
                    .is_none_or(|tag| article.tag_list.contains(tag))
                    && query
                        .author
                        .as_ref()
                        .is_none_or(|author| &article.author.username == author)
                    && query
                        .favorited
                        .as_ref()
                        .is_none_or(|username| stored.favorited_by.contains(username))
            }))
        }))
    }

    fn feed(&self, limit: u64, offset: u64) -> impl Future<Output = Result<ArticleList>> + Send {
        let path = paths::feed(limit, offset);
        ready(self.handle("GET", &path, Auth::Required, |backend, viewer| {
            let viewer = viewer.unwrap_or_default();
            Ok(backend.page(Some(viewer), limit, offset, |stored| {
                backend.follows.contains(&(
                    viewer.to_string(),
                    stored.article.author.username.clone(),
                ))
            }))
        }))
    }

    fn get_article(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        ready(
            self.handle("GET", &paths::article(slug), Auth::Optional, |backend, viewer| {
                let stored = backend.stored(slug)?;
                Ok(backend.project(stored, viewer))
            }),
        )
    }

    fn create_article(&self, draft: ArticleDraft) -> impl Future<Output = Result<Article>> + Send {
        ready(
            self.handle("POST", paths::ARTICLES, Auth::Required, |backend, viewer| {
                backend.insert_article(viewer.unwrap_or_default(), draft)
            }),
        )
    }

    fn update_article(
        &self,
        slug: &str,
        draft: ArticleDraft,
    ) -> impl Future<Output = Result<Article>> + Send {
        ready(
            self.handle("PUT", &paths::article(slug), Auth::Required, |backend, viewer| {
                if draft.title.trim().is_empty() {
                    return Err(invalid("title", "can't be blank"));
                }
                let now = backend.now();
                let stored = backend.stored_mut(slug)?;
                if Some(stored.article.author.username.as_str()) != viewer {
                    return Err(status(403));
                }
                stored.article.title = draft.title;
                stored.article.description = draft.description;
                stored.article.body = draft.body;
                stored.article.tag_list = draft.tag_list;
                stored.article.updated_at = Some(now);

                let stored = backend.stored(slug)?;
                Ok(backend.project(stored, viewer))
            }),
        )
    }

    fn delete_article(&self, slug: &str) -> impl Future<Output = Result<()>> + Send {
        ready(
            self.handle("DELETE", &paths::article(slug), Auth::Required, |backend, viewer| {
                let stored = backend.stored(slug)?;
                if Some(stored.article.author.username.as_str()) != viewer {
                    return Err(status(403));
                }
                backend.articles.retain(|stored| stored.article.slug != slug);
                backend.comments.remove(slug);
                Ok(())
            }),
        )
    }

    fn favorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        ready(
            self.handle("POST", &paths::favorite(slug), Auth::Required, |backend, viewer| {
                let viewer = viewer.unwrap_or_default();
                backend
                    .stored_mut(slug)?
                    .favorited_by
                    .insert(viewer.to_string());
                let stored = backend.stored(slug)?;
                Ok(backend.project(stored, Some(viewer)))
            }),
        )
    }

    fn unfavorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        ready(
            self.handle("DELETE", &paths::favorite(slug), Auth::Required, |backend, viewer| {
                let viewer = viewer.unwrap_or_default();
                backend.stored_mut(slug)?.favorited_by.remove(viewer);
                let stored = backend.stored(slug)?;
                Ok(backend.project(stored, Some(viewer)))
            }),
        )
    }

    fn comments(&self, slug: &str) -> impl Future<Output = Result<Vec<Comment>>> + Send {
        ready(
            self.handle("GET", &paths::comments(slug), Auth::Optional, |backend, viewer| {
                backend.stored(slug)?;
                let comments = backend.comments.get(slug).cloned().unwrap_or_default();
                Ok(comments
                    .into_iter()
                    .rev()
                    .map(|mut comment| {
                        if let Some(author) = backend.profile(&comment.author.username, viewer) {
                            comment.author = author;
                        }
                        comment
                    })
                    .collect())
            }),
        )
    }

    fn add_comment(
        &self,
        slug: &str,
        body: String,
    ) -> impl Future<Output = Result<Comment>> + Send {
        ready(
            self.handle("POST", &paths::comments(slug), Auth::Required, |backend, viewer| {
                backend.insert_comment(slug, viewer.unwrap_or_default(), &body)
            }),
        )
    }

    fn delete_comment(&self, slug: &str, id: u64) -> impl Future<Output = Result<()>> + Send {
        ready(
            self.handle("DELETE", &paths::comment(slug, id), Auth::Required, |backend, viewer| {
                let comments = backend.comments.get_mut(slug).ok_or_else(not_found)?;
                let position = comments
                    .iter()
                    .position(|comment| comment.id == id)
                    .ok_or_else(not_found)?;
                if Some(comments[position].author.username.as_str()) != viewer {
                    return Err(status(403));
                }
                comments.remove(position);
                Ok(())
            }),
        )
    }

    fn get_profile(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        ready(
            self.handle("GET", &paths::profile(username), Auth::Optional, |backend, viewer| {
                backend.profile(username, viewer).ok_or_else(not_found)
            }),
        )
    }

    fn follow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        ready(
            self.handle("POST", &paths::follow(username), Auth::Required, |backend, viewer| {
                let viewer = viewer.unwrap_or_default();
                backend.account(username).ok_or_else(not_found)?;
                backend
                    .follows
                    .insert((viewer.to_string(), username.to_string()));
                backend.profile(username, Some(viewer)).ok_or_else(not_found)
            }),
        )
    }

    fn unfollow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        ready(
            self.handle("DELETE", &paths::follow(username), Auth::Required, |backend, viewer| {
                let viewer = viewer.unwrap_or_default();
                backend
                    .follows
                    .remove(&(viewer.to_string(), username.to_string()));
                backend.profile(username, Some(viewer)).ok_or_else(not_found)
            }),
        )
    }

    fn tags(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        ready(self.handle("GET", paths::TAGS, Auth::Optional, |backend, _| {
            let mut tags: Vec<String> = Vec::new();
            for stored in &backend.articles {
                for tag in &stored.article.tag_list {
                    if !tags.contains(tag) {
                        tags.push(tag.clone());
                    }
                }
            }
            Ok(tags)
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use tokio_test::block_on;

    fn backend() -> MockConduitApi {
        let api = MockConduitApi::new();
        api.with_user("alice");
        api.with_user("bob");
        api
    }

    #[test]
    fn unknown_token_is_rejected_everywhere() {
        let api = backend().with_token(Some("stale".to_string()));

        assert_eq!(block_on(api.current_user()).unwrap_err().status(), Some(401));
        assert_eq!(block_on(api.tags()).unwrap_err().status(), Some(401));
    }

    #[test]
    fn login_checks_credentials() {
        let api = backend();

        let user = block_on(api.login(LoginUser {
            email: "alice@conduit.test".into(),
            password: FIXTURE_PASSWORD.into(),
        }))
        .unwrap();
        assert_eq!(user.token, MockConduitApi::token_for("alice"));

        let error = block_on(api.login(LoginUser {
            email: "alice@conduit.test".into(),
            password: "nope".into(),
        }))
        .unwrap_err();
        assert_eq!(
            error.validation_errors().unwrap().to_messages(),
            vec!["email or password is invalid"]
        );
    }

    #[test]
    fn listing_is_newest_first_and_paginated() {
        let api = backend();
        api.with_articles("alice", 23);

        let page = block_on(api.list_articles(ArticleQuery::page(10, 20))).unwrap();

        assert_eq!(page.articles_count, 23);
        assert_eq!(page.articles.len(), 3);
        assert_eq!(page.articles[0].title, "Article 3");
        assert!(page.articles.iter().all(|a| a.body.is_empty()));
        assert_eq!(
            api.calls(),
            vec!["GET /articles/?limit=10&offset=20".to_string()]
        );
    }

    #[test]
    fn favorites_are_viewer_specific() {
        let api = backend();
        let article = api.with_article("bob", "Dragons", &["dragons"]);
        let alice = api.with_token(Some(MockConduitApi::token_for("alice")));

        let favorited = block_on(alice.favorite(&article.slug)).unwrap();
        assert!(favorited.favorited);
        assert_eq!(favorited.favorites_count, 1);

        let anonymous = block_on(api.get_article(&article.slug)).unwrap();
        assert!(!anonymous.favorited);
        assert_eq!(anonymous.favorites_count, 1);

        let favorites =
            block_on(api.list_articles(ArticleQuery::page(10, 0).with_favorited("alice"))).unwrap();
        assert_eq!(favorites.articles_count, 1);
    }

    #[test]
    fn feed_contains_followed_authors_only() {
        let api = backend();
        api.with_article("bob", "Followed", &[]);
        api.with_user("carol");
        api.with_article("carol", "Unfollowed", &[]);
        api.with_follow("alice", "bob");

        let alice = api.with_token(Some(MockConduitApi::token_for("alice")));
        let feed = block_on(alice.feed(10, 0)).unwrap();

        assert_eq!(feed.articles_count, 1);
        assert_eq!(feed.articles[0].title, "Followed");
        assert!(feed.articles[0].author.following);
        assert_eq!(block_on(api.feed(10, 0)).unwrap_err().status(), Some(401));
    }

    #[test]
    fn only_authors_delete_comments() {
        let api = backend();
        let article = api.with_article("alice", "Dragons", &[]);
        let comment = api.with_comment(&article.slug, "alice", "First");

        let bob = api.with_token(Some(MockConduitApi::token_for("bob")));
        let error = block_on(bob.delete_comment(&article.slug, comment.id)).unwrap_err();
        assert_eq!(error.status(), Some(403));

        let alice = api.with_token(Some(MockConduitApi::token_for("alice")));
        block_on(alice.delete_comment(&article.slug, comment.id)).unwrap();
        assert!(api.stored_comments(&article.slug).is_empty());
    }

    #[test]
    fn injected_failures_match_by_prefix() {
        let api = backend();
        api.fail_on("GET /tags/", status(500));

        assert_eq!(block_on(api.tags()).unwrap_err().status(), Some(500));

        api.clear_failures();
        assert!(block_on(api.tags()).unwrap().is_empty());
        assert_eq!(api.calls_matching("GET /tags/").len(), 2);
    }

    #[test]
    fn slugs_are_unique() {
        let api = backend();
        let first = api.with_article("alice", "Hello, World!", &[]);
        let second = api.with_article("alice", "Hello World", &[]);

        assert_eq!(first.slug, "hello-world");
        assert_eq!(second.slug, "hello-world-2");
    }
}
