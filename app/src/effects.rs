//! Effect builders
//!
//! Each builder takes a client already bound to the session's token and
//! returns an [`Effect`] whose result comes back as an [`AppAction`]. Page
//! requests carry the generation they were issued under.

use crate::actions::{AppAction, SessionRequest};
use crate::state::{ArticleDetail, ListSource};
use conduit_api::ConduitApi;
use conduit_api::types::{ArticleDraft, ArticleQuery, LoginUser, NewUser, UserPatch};
use conduit_core::effect::Effect;
use std::time::Duration;

/// `GET /tags/`
pub fn tags<C: ConduitApi>(client: C, generation: u64) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.tags().await;
        Some(AppAction::TagsLoaded { generation, result })
    })
}

/// One page of an article list
pub fn article_list<C: ConduitApi>(
    client: C,
    source: ListSource,
    limit: u64,
    offset: u64,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let page = ArticleQuery::page(limit, offset);
        let result = match source {
            ListSource::Feed => client.feed(limit, offset).await,
            ListSource::Global => client.list_articles(page).await,
            ListSource::Tag(tag) => client.list_articles(page.with_tag(tag)).await,
            ListSource::Author(username) => client.list_articles(page.with_author(username)).await,
            ListSource::Favorited(username) => {
                client.list_articles(page.with_favorited(username)).await
            },
        };
        Some(AppAction::ListLoaded {
            generation,
            offset,
            result,
        })
    })
}

/// The article, then its comments
pub fn article_detail<C: ConduitApi>(client: C, slug: String, generation: u64) -> Effect<AppAction> {
    Effect::future(async move {
        let result = match client.get_article(&slug).await {
            Ok(article) => client
                .comments(&slug)
                .await
                .map(|comments| ArticleDetail { article, comments }),
            Err(error) => Err(error),
        };
        Some(AppAction::ArticleLoaded { generation, result })
    })
}

/// The article an editor page edits
pub fn editor_article<C: ConduitApi>(client: C, slug: String, generation: u64) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.get_article(&slug).await;
        Some(AppAction::EditorArticleLoaded { generation, result })
    })
}

/// `GET /profiles/{username}/`
pub fn profile<C: ConduitApi>(client: C, username: String, generation: u64) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.get_profile(&username).await;
        Some(AppAction::ProfileLoaded { generation, result })
    })
}

/// `GET /user/` with `token`
pub fn current_user<C: ConduitApi>(client: C, token: String, route_after: bool) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.current_user().await;
        Some(AppAction::CurrentUserLoaded {
            token,
            route_after,
            result,
        })
    })
}

/// `POST /users/login/`
pub fn login<C: ConduitApi>(client: C, credentials: LoginUser) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.login(credentials).await;
        Some(AppAction::SessionResponse {
            request: SessionRequest::Login,
            result,
        })
    })
}

/// `POST /users/`
pub fn register<C: ConduitApi>(client: C, user: NewUser) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.register(user).await;
        Some(AppAction::SessionResponse {
            request: SessionRequest::Register,
            result,
        })
    })
}

/// `PUT /user/`
pub fn update_user<C: ConduitApi>(client: C, patch: UserPatch) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.update_user(patch).await;
        Some(AppAction::SessionResponse {
            request: SessionRequest::Update,
            result,
        })
    })
}

/// Favorite when `favorited` is `false`, unfavorite otherwise
pub fn toggle_favorite<C: ConduitApi>(
    client: C,
    slug: String,
    favorited: bool,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let result = if favorited {
            client.unfavorite(&slug).await
        } else {
            client.favorite(&slug).await
        };
        Some(AppAction::FavoriteToggled { generation, result })
    })
}

/// Follow when `following` is `false`, unfollow otherwise
pub fn toggle_follow<C: ConduitApi>(
    client: C,
    username: String,
    following: bool,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let result = if following {
            client.unfollow(&username).await
        } else {
            client.follow(&username).await
        };
        Some(AppAction::FollowToggled { generation, result })
    })
}

/// Create a new article, or update `slug` when given
pub fn publish<C: ConduitApi>(
    client: C,
    slug: Option<String>,
    draft: ArticleDraft,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let result = match slug {
            Some(slug) => client.update_article(&slug, draft).await,
            None => client.create_article(draft).await,
        };
        Some(AppAction::ArticlePublished { generation, result })
    })
}

/// `DELETE /articles/{slug}/`
pub fn delete_article<C: ConduitApi>(client: C, slug: String, generation: u64) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.delete_article(&slug).await;
        Some(AppAction::ArticleDeleted { generation, result })
    })
}

/// `POST /articles/{slug}/comments/`
pub fn post_comment<C: ConduitApi>(
    client: C,
    slug: String,
    body: String,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.add_comment(&slug, body).await;
        Some(AppAction::CommentPosted { generation, result })
    })
}

/// `DELETE /articles/{slug}/comments/{id}/`
pub fn delete_comment<C: ConduitApi>(
    client: C,
    slug: String,
    id: u64,
    generation: u64,
) -> Effect<AppAction> {
    Effect::future(async move {
        let result = client.delete_comment(&slug, id).await;
        Some(AppAction::CommentDeleted {
            generation,
            id,
            result,
        })
    })
}

/// Dismiss alert `id` after `ttl`
pub fn dismiss_alert(id: u64, ttl: Duration) -> Effect<AppAction> {
    Effect::Delay {
        duration: ttl,
        action: Box::new(AppAction::DismissAlert { id }),
    }
}
