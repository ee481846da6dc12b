//! Typed resource operations over the HTTP client
//!
//! [`ConduitApi`] is the seam the application depends on. [`HttpClient`]
//! implements it against a live backend; `conduit-testing` provides an
//! in-memory implementation for tests.

use crate::client::HttpClient;
use crate::error::Result;
use crate::paths;
use crate::types::{
    Article, ArticleDraft, ArticleEnvelope, ArticleList, ArticleQuery, Comment, CommentEnvelope,
    CommentsEnvelope, LoginUser, NewComment, NewUser, Profile, ProfileEnvelope, TagsEnvelope,
    User, UserEnvelope, UserPatch,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Typed operations on users, articles, comments, profiles and tags
///
/// Every method returns a `Send` future so callers can hand it to an effect
/// executor. Implementations are cheap to clone.
pub trait ConduitApi: Clone + Send + Sync + 'static {
    /// A copy of this client that authenticates with `token`
    #[must_use]
    fn with_token(&self, token: Option<String>) -> Self;

    /// `POST /users/login/`
    ///
    /// # Errors
    ///
    /// Fails on rejected credentials or transport errors.
    fn login(&self, credentials: LoginUser) -> impl Future<Output = Result<User>> + Send;

    /// `POST /users/`
    ///
    /// # Errors
    ///
    /// Fails with field errors when the username or email is taken.
    fn register(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send;

    /// `GET /user/`
    ///
    /// # Errors
    ///
    /// Fails when the bound token is rejected.
    fn current_user(&self) -> impl Future<Output = Result<User>> + Send;

    /// `PUT /user/`
    ///
    /// # Errors
    ///
    /// Fails with field errors on invalid values.
    fn update_user(&self, patch: UserPatch) -> impl Future<Output = Result<User>> + Send;

    /// `GET /articles/?...`
    ///
    /// # Errors
    ///
    /// Fails on transport or server errors.
    fn list_articles(&self, query: ArticleQuery)
    -> impl Future<Output = Result<ArticleList>> + Send;

    /// `GET /articles/feed/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated.
    fn feed(&self, limit: u64, offset: u64) -> impl Future<Output = Result<ArticleList>> + Send;

    /// `GET /articles/{slug}/`
    ///
    /// # Errors
    ///
    /// Fails with 404 for an unknown slug.
    fn get_article(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send;

    /// `POST /articles/`
    ///
    /// # Errors
    ///
    /// Fails with field errors on invalid drafts.
    fn create_article(&self, draft: ArticleDraft) -> impl Future<Output = Result<Article>> + Send;

    /// `PUT /articles/{slug}/`
    ///
    /// # Errors
    ///
    /// Fails with field errors on invalid drafts or 403 for non-authors.
    fn update_article(
        &self,
        slug: &str,
        draft: ArticleDraft,
    ) -> impl Future<Output = Result<Article>> + Send;

    /// `DELETE /articles/{slug}/`
    ///
    /// # Errors
    ///
    /// Fails for non-authors or unknown slugs.
    fn delete_article(&self, slug: &str) -> impl Future<Output = Result<()>> + Send;

    /// `POST /articles/{slug}/favorite/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the slug is unknown.
    fn favorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send;

    /// `DELETE /articles/{slug}/favorite/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the slug is unknown.
    fn unfavorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send;

    /// `GET /articles/{slug}/comments/`
    ///
    /// # Errors
    ///
    /// Fails with 404 for an unknown slug.
    fn comments(&self, slug: &str) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// `POST /articles/{slug}/comments/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the body is empty.
    fn add_comment(&self, slug: &str, body: String)
    -> impl Future<Output = Result<Comment>> + Send;

    /// `DELETE /articles/{slug}/comments/{id}/`
    ///
    /// # Errors
    ///
    /// Fails for non-authors or unknown comments.
    fn delete_comment(&self, slug: &str, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// `GET /profiles/{username}/`
    ///
    /// # Errors
    ///
    /// Fails with 404 for an unknown username.
    fn get_profile(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send;

    /// `POST /profiles/{username}/follow/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the username is unknown.
    fn follow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send;

    /// `DELETE /profiles/{username}/follow/`
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the username is unknown.
    fn unfollow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send;

    /// `GET /tags/`
    ///
    /// # Errors
    ///
    /// Fails on transport or server errors.
    fn tags(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|e| crate::error::ApiError::RequestFailed(format!("invalid request body: {e}")))
}

impl ConduitApi for HttpClient {
    fn with_token(&self, token: Option<String>) -> Self {
        Self::with_token(self, token)
    }

    fn login(&self, credentials: LoginUser) -> impl Future<Output = Result<User>> + Send {
        let client = self.clone();

        async move {
            let body = to_body(&UserEnvelope { user: credentials })?;
            let envelope: UserEnvelope<User> = client
                .request_json(Method::POST, paths::LOGIN, Some(&body))
                .await?;
            Ok(envelope.user)
        }
    }

    fn register(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send {
        let client = self.clone();

        async move {
            let body = to_body(&UserEnvelope { user })?;
            let envelope: UserEnvelope<User> = client
                .request_json(Method::POST, paths::USERS, Some(&body))
                .await?;
            Ok(envelope.user)
        }
    }

    fn current_user(&self) -> impl Future<Output = Result<User>> + Send {
        let client = self.clone();

        async move {
            let envelope: UserEnvelope<User> = client
                .request_json(Method::GET, paths::CURRENT_USER, None)
                .await?;
            Ok(envelope.user)
        }
    }

    fn update_user(&self, patch: UserPatch) -> impl Future<Output = Result<User>> + Send {
        let client = self.clone();

        async move {
            let body = to_body(&UserEnvelope { user: patch })?;
            let envelope: UserEnvelope<User> = client
                .request_json(Method::PUT, paths::CURRENT_USER, Some(&body))
                .await?;
            Ok(envelope.user)
        }
    }

    fn list_articles(
        &self,
        query: ArticleQuery,
    ) -> impl Future<Output = Result<ArticleList>> + Send {
        let client = self.clone();
        let path = paths::article_list(&query);

        async move { client.request_json(Method::GET, &path, None).await }
    }

    fn feed(&self, limit: u64, offset: u64) -> impl Future<Output = Result<ArticleList>> + Send {
        let client = self.clone();
        let path = paths::feed(limit, offset);

        async move { client.request_json(Method::GET, &path, None).await }
    }

    fn get_article(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        let client = self.clone();
        let path = paths::article(slug);

        async move {
            let envelope: ArticleEnvelope<Article> =
                client.request_json(Method::GET, &path, None).await?;
            Ok(envelope.article)
        }
    }

    fn create_article(&self, draft: ArticleDraft) -> impl Future<Output = Result<Article>> + Send {
        let client = self.clone();

        async move {
            let body = to_body(&ArticleEnvelope { article: draft })?;
            let envelope: ArticleEnvelope<Article> = client
                .request_json(Method::POST, paths::ARTICLES, Some(&body))
                .await?;
            Ok(envelope.article)
        }
    }

    fn update_article(
        &self,
        slug: &str,
        draft: ArticleDraft,
    ) -> impl Future<Output = Result<Article>> + Send {
        let client = self.clone();
        let path = paths::article(slug);

        async move {
            let body = to_body(&ArticleEnvelope { article: draft })?;
            let envelope: ArticleEnvelope<Article> =
                client.request_json(Method::PUT, &path, Some(&body)).await?;
            Ok(envelope.article)
        }
    }

    fn delete_article(&self, slug: &str) -> impl Future<Output = Result<()>> + Send {
        let client = self.clone();
        let path = paths::article(slug);

        async move {
            client.request(Method::DELETE, &path, None).await?;
            Ok(())
        }
    }

    fn favorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        let client = self.clone();
        let path = paths::favorite(slug);

        async move {
            let envelope: ArticleEnvelope<Article> =
                client.request_json(Method::POST, &path, None).await?;
            Ok(envelope.article)
        }
    }

    fn unfavorite(&self, slug: &str) -> impl Future<Output = Result<Article>> + Send {
        let client = self.clone();
        let path = paths::favorite(slug);

        async move {
            let envelope: ArticleEnvelope<Article> =
                client.request_json(Method::DELETE, &path, None).await?;
            Ok(envelope.article)
        }
    }

    fn comments(&self, slug: &str) -> impl Future<Output = Result<Vec<Comment>>> + Send {
        let client = self.clone();
        let path = paths::comments(slug);

        async move {
            let envelope: CommentsEnvelope = client.request_json(Method::GET, &path, None).await?;
            Ok(envelope.comments)
        }
    }

    fn add_comment(
        &self,
        slug: &str,
        body: String,
    ) -> impl Future<Output = Result<Comment>> + Send {
        let client = self.clone();
        let path = paths::comments(slug);

        async move {
            let payload = to_body(&CommentEnvelope {
                comment: NewComment { body },
            })?;
            let envelope: CommentEnvelope<Comment> = client
                .request_json(Method::POST, &path, Some(&payload))
                .await?;
            Ok(envelope.comment)
        }
    }

    fn delete_comment(&self, slug: &str, id: u64) -> impl Future<Output = Result<()>> + Send {
        let client = self.clone();
        let path = paths::comment(slug, id);

        async move {
            client.request(Method::DELETE, &path, None).await?;
            Ok(())
        }
    }

    fn get_profile(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        let client = self.clone();
        let path = paths::profile(username);

        async move {
            let envelope: ProfileEnvelope = client.request_json(Method::GET, &path, None).await?;
            Ok(envelope.profile)
        }
    }

    fn follow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        let client = self.clone();
        let path = paths::follow(username);

        async move {
            let envelope: ProfileEnvelope = client.request_json(Method::POST, &path, None).await?;
            Ok(envelope.profile)
        }
    }

    fn unfollow(&self, username: &str) -> impl Future<Output = Result<Profile>> + Send {
        let client = self.clone();
        let path = paths::follow(username);

        async move {
            let envelope: ProfileEnvelope =
                client.request_json(Method::DELETE, &path, None).await?;
            Ok(envelope.profile)
        }
    }

    fn tags(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        let client = self.clone();

        async move {
            let envelope: TagsEnvelope = client.request_json(Method::GET, paths::TAGS, None).await?;
            Ok(envelope.tags)
        }
    }
}
