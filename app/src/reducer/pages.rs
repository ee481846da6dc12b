//! Page renderers
//!
//! [`enter`] selects the page for a route and starts its fetches;
//! [`PageReducer`] folds the fetch results into state.

use super::{ApiMarker, Effects, is_current, navigation};
use crate::actions::AppAction;
use crate::effects;
use crate::environment::AppEnvironment;
use crate::route::Route;
use crate::state::{
    AppState, ArticlePage, EditorPage, FeedTab, HomePage, Loadable, Page, ProfilePage,
};
use conduit_api::ConduitApi;
use conduit_api::types::ArticleDraft;
use conduit_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Set up the page for `route` and return its fetch effects
pub fn enter<C: ConduitApi>(state: &mut AppState, route: Route, env: &AppEnvironment<C>) -> Effects {
    let generation = state.generation;
    let client = env.client(&state.session);

    match route {
        Route::Home => {
            if state.view.tab == FeedTab::Feed && !state.session.is_authenticated() {
                state.view.tab = FeedTab::Global;
            }
            state.page = Page::Home(HomePage::default());
            smallvec![Effect::merge(vec![
                effects::tags(client, generation),
                load_list(state, env),
            ])]
        },
        Route::Login => {
            state.page = Page::Login { errors: Vec::new() };
            SmallVec::new()
        },
        Route::Register => {
            state.page = Page::Register { errors: Vec::new() };
            SmallVec::new()
        },
        Route::Settings => {
            state.page = Page::Settings { errors: Vec::new() };
            SmallVec::new()
        },
        Route::NewArticle => {
            state.page = Page::Editor(EditorPage {
                slug: None,
                draft: Some(ArticleDraft::default()),
                errors: Vec::new(),
            });
            SmallVec::new()
        },
        Route::EditArticle { slug } => {
            state.page = Page::Editor(EditorPage {
                slug: Some(slug.clone()),
                draft: None,
                errors: Vec::new(),
            });
            smallvec![effects::editor_article(client, slug, generation)]
        },
        Route::Article { slug } => {
            state.page = Page::Article(ArticlePage {
                slug: slug.clone(),
                detail: Loadable::Loading,
            });
            smallvec![effects::article_detail(client, slug, generation)]
        },
        Route::Profile { username, tab } => {
            state.page = Page::Profile(ProfilePage {
                username: username.clone(),
                tab,
                profile: Loadable::Loading,
                list: Loadable::Loading,
            });
            smallvec![effects::profile(client, username, generation)]
        },
    }
}

/// Mark the list region loading and request the page at `view.page_offset`
///
/// Pages without a list get no effect.
pub fn load_list<C: ConduitApi>(state: &mut AppState, env: &AppEnvironment<C>) -> Effect<AppAction> {
    let Some(source) = state.list_source() else {
        return Effect::None;
    };
    if let Some(list) = state.page.list_mut() {
        *list = Loadable::Loading;
    }

    tracing::debug!(
        ?source,
        offset = state.view.page_offset,
        generation = state.generation,
        "Loading article list"
    );

    effects::article_list(
        env.client(&state.session),
        source,
        state.view.page_size,
        state.view.page_offset,
        state.generation,
    )
}

/// Folds page fetch results into state
#[derive(Debug)]
pub struct PageReducer<C> {
    _api: ApiMarker<C>,
}

impl<C> PageReducer<C> {
    /// Create the page reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _api: std::marker::PhantomData,
        }
    }
}

impl<C> Default for PageReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConduitApi> Reducer for PageReducer<C> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // TagsLoaded: a failed tag cloud renders empty
            // ═══════════════════════════════════════════════════════════════
            AppAction::TagsLoaded { generation, result } => {
                if !is_current(state, generation, "tags") {
                    return SmallVec::new();
                }
                if let Page::Home(home) = &mut state.page {
                    home.tags = Some(result.unwrap_or_else(|error| {
                        tracing::warn!(%error, "Failed to load tags");
                        Vec::new()
                    }));
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════════
            // ListLoaded: applies only at the current generation and offset
            // ═══════════════════════════════════════════════════════════════
            AppAction::ListLoaded {
                generation,
                offset,
                result,
            } => {
                if !is_current(state, generation, "article list") {
                    return SmallVec::new();
                }
                if offset != state.view.page_offset {
                    tracing::warn!(
                        offset,
                        current = state.view.page_offset,
                        "Discarding article list for another page"
                    );
                    return SmallVec::new();
                }
                if let Some(list) = state.page.list_mut() {
                    *list = match result {
                        Ok(articles) => Loadable::Ready(articles),
                        Err(error) => {
                            tracing::warn!(%error, "Failed to load articles");
                            Loadable::Failed
                        },
                    };
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════════
            // ArticleLoaded: either request failing is terminal
            // ═══════════════════════════════════════════════════════════════
            AppAction::ArticleLoaded { generation, result } => {
                if !is_current(state, generation, "article") {
                    return SmallVec::new();
                }
                if let Page::Article(page) = &mut state.page {
                    page.detail = match result {
                        Ok(detail) => Loadable::Ready(detail),
                        Err(error) => {
                            tracing::warn!(%error, slug = %page.slug, "Failed to load article");
                            Loadable::Failed
                        },
                    };
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════════
            // EditorArticleLoaded: prefill, or go home when it cannot load
            // ═══════════════════════════════════════════════════════════════
            AppAction::EditorArticleLoaded { generation, result } => {
                if !is_current(state, generation, "editor article") {
                    return SmallVec::new();
                }
                match result {
                    Ok(article) => {
                        if let Page::Editor(editor) = &mut state.page {
                            editor.draft = Some(ArticleDraft::from_article(&article));
                        }
                        SmallVec::new()
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Cannot edit article, returning home");
                        navigation::navigate(state, "/", env)
                    },
                }
            },

            // ═══════════════════════════════════════════════════════════════
            // ProfileLoaded: on success the article list follows
            // ═══════════════════════════════════════════════════════════════
            AppAction::ProfileLoaded { generation, result } => {
                if !is_current(state, generation, "profile") {
                    return SmallVec::new();
                }
                let Page::Profile(page) = &mut state.page else {
                    return SmallVec::new();
                };
                match result {
                    Ok(profile) => {
                        page.profile = Loadable::Ready(profile);
                        smallvec![load_list(state, env)]
                    },
                    Err(error) => {
                        tracing::warn!(%error, username = %page.username, "Failed to load profile");
                        page.profile = Loadable::Failed;
                        page.list = Loadable::Failed;
                        SmallVec::new()
                    },
                }
            },

            _ => SmallVec::new(),
        }
    }
}
