//! Favorites, follows, publishing, comments and alerts
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{ALERT_TTL, Harness};
use conduit_api::ApiError;
use conduit_app::AppAction;
use conduit_app::views::Body;
use conduit_core::environment::LocationBar;
use conduit_testing::MockConduitApi;

fn backend() -> MockConduitApi {
    let api = MockConduitApi::new();
    api.with_user("alice");
    api.with_user("bob");
    api
}

fn server_error() -> ApiError {
    ApiError::Api {
        status: 500,
        errors: None,
    }
}

async fn article_view(h: &Harness) -> conduit_app::views::ArticleView {
    match h.screen().await.body {
        Body::Article(article) => article,
        other => panic!("expected an article, got {other:?}"),
    }
}

#[tokio::test]
async fn favoriting_from_a_list_reloads_the_list() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.api.clear_calls();

    h.press("favorite-dragons").await;

    assert_eq!(
        h.api.calls(),
        vec![
            "POST /articles/dragons/favorite/".to_string(),
            "GET /articles/?limit=10&offset=0".to_string(),
        ]
    );
    let Body::Home(home) = h.screen().await.body else {
        panic!("expected the home page");
    };
    assert!(home.list.articles[0].favorited);
    assert_eq!(home.list.articles[0].favorites_count, 1);
}

#[tokio::test]
async fn toggling_a_favorited_article_unfavorites_it() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    api.with_favorite("alice", "dragons");
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.api.clear_calls();

    h.send(AppAction::ToggleFavorite {
        slug: "dragons".into(),
        favorited: true,
    })
    .await;

    assert_eq!(h.api.calls_matching("DELETE /articles/dragons/favorite/").len(), 1);
    assert!(h.api.calls_matching("POST ").is_empty());
    assert_eq!(h.api.article("dragons").unwrap().favorites_count, 0);
}

#[tokio::test]
async fn favoriting_on_the_article_page_updates_it_in_place() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;
    h.api.clear_calls();

    h.press("favorite-article").await;

    assert_eq!(h.api.calls(), vec!["POST /articles/dragons/favorite/".to_string()]);
    let article = article_view(&h).await;
    assert!(article.favorited);
    assert_eq!(article.favorites_count, 1);
    assert_eq!(
        h.screen().await.control("favorite-article").unwrap().label,
        "Unfavorite Article (1)"
    );
}

#[tokio::test]
async fn anonymous_favorites_go_to_login() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.send(AppAction::Start).await;
    h.api.clear_calls();

    h.press("favorite-dragons").await;

    assert_eq!(h.location.current(), "/login");
    assert!(h.api.calls_matching("POST ").is_empty());
}

#[tokio::test]
async fn following_an_author_updates_the_article_header() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;

    h.press("follow-author").await;

    assert!(h.api.is_following("alice", "bob"));
    assert!(article_view(&h).await.following);
    assert_eq!(
        h.screen().await.control("follow-author").unwrap().label,
        "Unfollow bob"
    );
}

#[tokio::test]
async fn unfollowing_from_the_profile_page() {
    let api = backend();
    api.with_follow("alice", "bob");
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/profile/bob").await;

    h.press("follow-profile").await;

    assert!(!h.api.is_following("alice", "bob"));
    let Body::Profile(profile) = h.screen().await.body else {
        panic!("expected a profile");
    };
    assert!(!profile.following);
}

#[tokio::test]
async fn publishing_a_new_article_opens_it() {
    let h = Harness::new(backend());
    h.login_as("alice").await;
    h.visit("/editor").await;

    h.submit(
        "form-editor",
        &[
            ("title", "Taming Dragons"),
            ("description", "A field guide"),
            ("body", "Step one: be brave"),
            ("tags", "dragons, guides"),
        ],
    )
    .await;

    assert_eq!(h.location.current(), "/article/taming-dragons");
    let article = article_view(&h).await;
    assert_eq!(article.title, "Taming Dragons");
    assert_eq!(article.tags, vec!["dragons", "guides"]);
    assert!(article.own);
}

#[tokio::test]
async fn publish_errors_stay_in_the_editor() {
    let h = Harness::new(backend());
    h.login_as("alice").await;
    h.visit("/editor").await;

    h.submit("form-editor", &[("title", ""), ("body", "No title")]).await;

    assert_eq!(h.location.current(), "/editor");
    let Body::Form(form) = h.screen().await.body else {
        panic!("expected the editor form");
    };
    assert_eq!(form.errors, vec!["title can't be blank"]);
    // The entered values survive the failed attempt.
    let control = h.screen().await.control("form-editor").cloned().unwrap();
    let conduit_app::views::Intent::Form { fields, .. } = control.intent else {
        panic!("expected a form");
    };
    assert!(fields.contains(&("body".to_string(), "No title".to_string())));
}

#[tokio::test]
async fn editing_an_article_updates_it() {
    let api = backend();
    api.with_article("alice", "Dragons", &["dragons"]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/editor/dragons").await;

    h.submit("form-editor", &[("body", "Rewritten")]).await;

    assert_eq!(h.api.calls_matching("PUT /articles/dragons/").len(), 1);
    assert_eq!(h.location.current(), "/article/dragons");
    assert_eq!(article_view(&h).await.body, "Rewritten");
    assert_eq!(h.api.article("dragons").unwrap().tag_list, vec!["dragons"]);
}

#[tokio::test]
async fn deleting_an_article_goes_home() {
    let api = backend();
    api.with_article("alice", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;

    h.press("delete-article").await;

    assert!(h.api.article("dragons").is_none());
    assert_eq!(h.location.current(), "/");
}

#[tokio::test]
async fn comments_are_posted_and_deleted_in_place() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;

    h.submit("form-comment", &[("body", "Great read")]).await;

    let article = article_view(&h).await;
    assert_eq!(article.comments.len(), 1);
    assert_eq!(article.comments[0].body, "Great read");
    assert!(article.comments[0].deletable);
    let id = article.comments[0].id;

    h.press(&format!("delete-comment-{id}")).await;

    assert!(article_view(&h).await.comments.is_empty());
    assert!(h.api.stored_comments("dragons").is_empty());
}

#[tokio::test]
async fn failures_raise_an_alert_that_expires() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;
    h.api.fail_on("POST /articles/dragons/favorite/", server_error());

    h.press("favorite-article").await;

    assert_eq!(
        h.screen().await.alert.as_deref(),
        Some("Failed to favorite article")
    );
    assert!(!article_view(&h).await.favorited);

    tokio::time::sleep(ALERT_TTL * 4).await;
    assert_eq!(h.screen().await.alert, None);
}

#[tokio::test]
async fn navigating_away_clears_the_alert() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;
    h.api.fail_on("POST /profiles/bob/follow/", server_error());

    h.press("follow-author").await;
    assert_eq!(h.screen().await.alert.as_deref(), Some("Failed to follow user"));

    h.visit("/").await;
    assert_eq!(h.screen().await.alert, None);
}

#[tokio::test]
async fn a_failed_comment_keeps_the_list_and_alerts() {
    let api = backend();
    api.with_article("bob", "Dragons", &[]);
    api.with_comment("dragons", "bob", "First!");
    let h = Harness::new(api);
    h.login_as("alice").await;
    h.visit("/article/dragons").await;
    h.api.fail_on("POST /articles/dragons/comments/", server_error());

    h.submit("form-comment", &[("body", "Hello")]).await;

    assert_eq!(article_view(&h).await.comments.len(), 1);
    assert_eq!(h.screen().await.alert.as_deref(), Some("Failed to post comment"));
}
