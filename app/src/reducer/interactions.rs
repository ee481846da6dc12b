//! Interaction reducer
//!
//! Tabs and pagination re-render locally. Secondary actions (favorite,
//! follow, delete, comment) need a session, and their failures surface as
//! a transient alert without leaving the page.

use super::{ApiMarker, Effects, form_errors, is_current, navigation, pages, raise_alert};
use crate::actions::AppAction;
use crate::effects;
use crate::environment::AppEnvironment;
use crate::route::Route;
use crate::state::{AppState, FeedTab, Loadable, Page};
use conduit_api::ConduitApi;
use conduit_core::{SmallVec, reducer::Reducer, smallvec};

const FAVORITE_FAILED: &str = "Failed to favorite article";
const FOLLOW_FAILED: &str = "Failed to follow user";
const DELETE_ARTICLE_FAILED: &str = "Failed to delete article";
const POST_COMMENT_FAILED: &str = "Failed to post comment";
const DELETE_COMMENT_FAILED: &str = "Failed to delete comment";
const PUBLISH_FAILED: &str = "error Failed to publish";

/// Reducer for user interactions on a loaded page
#[derive(Debug)]
pub struct InteractionReducer<C> {
    _api: ApiMarker<C>,
}

impl<C> InteractionReducer<C> {
    /// Create the interaction reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _api: std::marker::PhantomData,
        }
    }
}

impl<C> Default for InteractionReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConduitApi> Reducer for InteractionReducer<C> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<C>;

    #[allow(clippy::too_many_lines)] // One arm per interaction
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SelectTab: full re-render of the home page
            // ═══════════════════════════════════════════════════════════════
            AppAction::SelectTab { tab } => {
                if tab == FeedTab::Feed && !state.session.is_authenticated() {
                    return navigation::navigate(state, navigation::LOGIN_PATH, env);
                }
                state.view.tab = tab;
                if state.route == Route::Home {
                    navigation::rerender(state, env)
                } else {
                    navigation::navigate(state, "/", env)
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // SelectPage: reload only the list region
            // ═══════════════════════════════════════════════════════════════
            AppAction::SelectPage { offset } => {
                if state.list_source().is_none() {
                    tracing::debug!(offset, "No article list on this page");
                    return SmallVec::new();
                }
                state.view.page_offset = offset;
                smallvec![pages::load_list(state, env)]
            },

            // ═══════════════════════════════════════════════════════════════
            // Favorites
            // ═══════════════════════════════════════════════════════════════
            AppAction::ToggleFavorite { slug, favorited } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let client = env.client(&state.session);
                smallvec![effects::toggle_favorite(
                    client,
                    slug,
                    favorited,
                    state.generation
                )]
            },

            AppAction::FavoriteToggled { generation, result } => {
                if !is_current(state, generation, "favorite") {
                    return SmallVec::new();
                }
                match result {
                    Ok(article) => {
                        if let Page::Article(page) = &mut state.page {
                            if let Some(detail) = page.detail.ready_mut() {
                                detail.article = article;
                            }
                            SmallVec::new()
                        } else {
                            smallvec![pages::load_list(state, env)]
                        }
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Favorite toggle failed");
                        smallvec![raise_alert(state, FAVORITE_FAILED, env)]
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Follows
            // ═══════════════════════════════════════════════════════════════
            AppAction::ToggleFollow {
                username,
                following,
            } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let client = env.client(&state.session);
                smallvec![effects::toggle_follow(
                    client,
                    username,
                    following,
                    state.generation
                )]
            },

            AppAction::FollowToggled { generation, result } => {
                if !is_current(state, generation, "follow") {
                    return SmallVec::new();
                }
                match result {
                    Ok(profile) => {
                        match &mut state.page {
                            Page::Article(page) => {
                                if let Some(detail) = page.detail.ready_mut() {
                                    if detail.article.author.username == profile.username {
                                        detail.article.author = profile;
                                    }
                                }
                            },
                            Page::Profile(page) => {
                                if page.username == profile.username {
                                    page.profile = Loadable::Ready(profile);
                                }
                            },
                            _ => {},
                        }
                        SmallVec::new()
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Follow toggle failed");
                        smallvec![raise_alert(state, FOLLOW_FAILED, env)]
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Editor
            // ═══════════════════════════════════════════════════════════════
            AppAction::PublishArticle { draft } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let generation = state.generation;
                let client = env.client(&state.session);
                let Page::Editor(editor) = &mut state.page else {
                    tracing::debug!("Publish outside the editor, ignoring");
                    return SmallVec::new();
                };
                editor.errors.clear();
                editor.draft = Some(draft.clone());
                smallvec![effects::publish(
                    client,
                    editor.slug.clone(),
                    draft,
                    generation
                )]
            },

            AppAction::ArticlePublished { generation, result } => {
                if !is_current(state, generation, "publish") {
                    return SmallVec::new();
                }
                match result {
                    Ok(article) => {
                        tracing::info!(slug = %article.slug, "Article published");
                        navigation::navigate(state, &format!("/article/{}", article.slug), env)
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Publish failed");
                        if let Page::Editor(editor) = &mut state.page {
                            editor.errors = form_errors(&error, PUBLISH_FAILED);
                        }
                        SmallVec::new()
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Article deletion
            // ═══════════════════════════════════════════════════════════════
            AppAction::DeleteArticle { slug } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let client = env.client(&state.session);
                smallvec![effects::delete_article(client, slug, state.generation)]
            },

            AppAction::ArticleDeleted { generation, result } => {
                if !is_current(state, generation, "delete article") {
                    return SmallVec::new();
                }
                match result {
                    Ok(()) => navigation::navigate(state, "/", env),
                    Err(error) => {
                        tracing::warn!(%error, "Article deletion failed");
                        smallvec![raise_alert(state, DELETE_ARTICLE_FAILED, env)]
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // Comments
            // ═══════════════════════════════════════════════════════════════
            AppAction::PostComment { slug, body } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let body = body.trim().to_string();
                if body.is_empty() {
                    tracing::debug!("Ignoring blank comment");
                    return SmallVec::new();
                }
                let client = env.client(&state.session);
                smallvec![effects::post_comment(client, slug, body, state.generation)]
            },

            AppAction::CommentPosted { generation, result } => {
                if !is_current(state, generation, "post comment") {
                    return SmallVec::new();
                }
                match result {
                    Ok(comment) => {
                        if let Page::Article(page) = &mut state.page {
                            if let Some(detail) = page.detail.ready_mut() {
                                detail.comments.insert(0, comment);
                            }
                        }
                        SmallVec::new()
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Posting comment failed");
                        smallvec![raise_alert(state, POST_COMMENT_FAILED, env)]
                    },
                }
            },

            AppAction::DeleteComment { slug, id } => {
                if let Some(redirect) = navigation::require_session(state, env) {
                    return redirect;
                }
                let client = env.client(&state.session);
                smallvec![effects::delete_comment(client, slug, id, state.generation)]
            },

            AppAction::CommentDeleted {
                generation,
                id,
                result,
            } => {
                if !is_current(state, generation, "delete comment") {
                    return SmallVec::new();
                }
                match result {
                    Ok(()) => {
                        if let Page::Article(page) = &mut state.page {
                            if let Some(detail) = page.detail.ready_mut() {
                                detail.comments.retain(|comment| comment.id != id);
                            }
                        }
                        SmallVec::new()
                    },
                    Err(error) => {
                        tracing::warn!(%error, id, "Comment deletion failed");
                        smallvec![raise_alert(state, DELETE_COMMENT_FAILED, env)]
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // DismissAlert: only the timer of the alert shown may clear it
            // ═══════════════════════════════════════════════════════════════
            AppAction::DismissAlert { id } => {
                if state.alert.as_ref().is_some_and(|alert| alert.id == id) {
                    state.alert = None;
                }
                SmallVec::new()
            },

            _ => SmallVec::new(),
        }
    }
}
