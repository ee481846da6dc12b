//! Page bodies
//!
//! One view model per page. Builders push the page's controls as they go.

use super::forms::FormKind;
use super::pagination::{PageLink, pagination};
use super::{Control, format_date, image_or_default};
use crate::actions::AppAction;
use crate::route::ProfileTab;
use crate::state::{
    AppState, ArticleDetail, EditorPage, FeedTab, HomePage, Loadable, Page, ProfilePage, Session,
};
use conduit_api::types::{Article, ArticleList, Comment, Profile};

/// Shown while an article list loads
pub const LOADING_ARTICLES: &str = "Loading articles...";
/// Shown when an article list failed
pub const ARTICLES_FAILED: &str = "Error loading articles.";
/// Shown for an empty article list
pub const NO_ARTICLES: &str = "No articles are here... yet.";
/// Terminal message of a failed article page
pub const ARTICLE_NOT_FOUND: &str = "Article not found.";
/// Terminal message of a failed profile page
pub const PROFILE_NOT_FOUND: &str = "Profile not found.";

/// Typed body of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Nothing routed yet
    Blank,
    /// Waiting for the page's primary resource
    Loading,
    /// A terminal message replacing the page
    Message(String),
    /// Home page
    Home(HomeView),
    /// A form page (login, register, settings, editor)
    Form(FormView),
    /// Article page
    Article(ArticleView),
    /// Profile page
    Profile(ProfileView),
}

/// A home page tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    /// Text shown
    pub label: String,
    /// Whether it is the selected tab
    pub active: bool,
}

/// Home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    /// Show the "conduit" banner (logged-out visitors only)
    pub banner: bool,
    /// Feed tabs
    pub tabs: Vec<TabView>,
    /// Article list region
    pub list: ListView,
    /// Tag cloud; `None` while loading
    pub tags: Option<Vec<String>>,
}

/// An article preview in a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePreview {
    /// Article slug
    pub slug: String,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Author username
    pub author: String,
    /// Author avatar
    pub image: String,
    /// Formatted creation date
    pub date: String,
    /// Tags
    pub tags: Vec<String>,
    /// Whether the viewer favorited it
    pub favorited: bool,
    /// Favorite count
    pub favorites_count: u64,
}

/// An article list region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Loading, error or empty message; `None` when articles are shown
    pub message: Option<String>,
    /// Previews, in server order
    pub articles: Vec<ArticlePreview>,
    /// Page controls
    pub pages: Vec<PageLink>,
}

/// A form page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Heading
    pub title: String,
    /// Error lines from the last submission
    pub errors: Vec<String>,
    /// Control id of the form; `None` while the form's data loads
    pub form: Option<String>,
}

/// A comment on the article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    /// Comment id
    pub id: u64,
    /// Comment text
    pub body: String,
    /// Author username
    pub author: String,
    /// Author avatar
    pub image: String,
    /// Formatted creation date
    pub date: String,
    /// Whether the viewer may delete it
    pub deletable: bool,
}

/// Article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    /// Title
    pub title: String,
    /// Body as raw markdown
    pub body: String,
    /// Tags
    pub tags: Vec<String>,
    /// Author username
    pub author: String,
    /// Author avatar
    pub image: String,
    /// Formatted creation date
    pub date: String,
    /// Whether the viewer follows the author
    pub following: bool,
    /// Whether the viewer favorited the article
    pub favorited: bool,
    /// Favorite count
    pub favorites_count: u64,
    /// Whether the viewer wrote it
    pub own: bool,
    /// Comments, newest first
    pub comments: Vec<CommentView>,
    /// Whether the comment form is shown
    pub can_comment: bool,
}

/// Profile page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// Username
    pub username: String,
    /// Bio
    pub bio: Option<String>,
    /// Avatar
    pub image: String,
    /// Whether the viewer follows them
    pub following: bool,
    /// Whether it is the viewer's own profile
    pub own: bool,
    /// Selected list
    pub tab: ProfileTab,
    /// Article list region
    pub list: ListView,
}

/// Build the body of the current page, pushing its controls
pub(super) fn body(state: &AppState, controls: &mut Vec<Control>) -> Body {
    let session = &state.session;
    match &state.page {
        Page::Blank => Body::Blank,
        Page::Home(home) => Body::Home(home_view(state, home, controls)),
        Page::Login { errors } => {
            controls.push(form_control(FormKind::Login, "Sign in", FormKind::Login.blank_fields()));
            controls.push(Control::navigate("link-register", "Need an account?", "/register"));
            Body::Form(form_view("Sign in", errors, Some(FormKind::Login)))
        },
        Page::Register { errors } => {
            controls.push(form_control(
                FormKind::Register,
                "Sign up",
                FormKind::Register.blank_fields(),
            ));
            controls.push(Control::navigate("link-login", "Have an account?", "/login"));
            Body::Form(form_view("Sign up", errors, Some(FormKind::Register)))
        },
        Page::Settings { errors } => {
            controls.push(form_control(
                FormKind::Settings,
                "Update Settings",
                settings_fields(session),
            ));
            controls.push(Control::dispatch(
                "logout",
                "Or click here to logout.",
                AppAction::Logout,
            ));
            Body::Form(form_view("Your Settings", errors, Some(FormKind::Settings)))
        },
        Page::Editor(editor) => Body::Form(editor_view(editor, controls)),
        Page::Article(page) => match &page.detail {
            Loadable::Loading => Body::Loading,
            Loadable::Failed => Body::Message(ARTICLE_NOT_FOUND.to_string()),
            Loadable::Ready(detail) => Body::Article(article_view(session, detail, controls)),
        },
        Page::Profile(page) => match &page.profile {
            Loadable::Loading => Body::Loading,
            Loadable::Failed => Body::Message(PROFILE_NOT_FOUND.to_string()),
            Loadable::Ready(profile) => {
                Body::Profile(profile_view(state, page, profile, controls))
            },
        },
    }
}

fn form_control(kind: FormKind, label: &str, fields: Vec<(String, String)>) -> Control {
    Control::form(kind.id(), label, kind, fields)
}

fn form_view(title: &str, errors: &[String], form: Option<FormKind>) -> FormView {
    FormView {
        title: title.to_string(),
        errors: errors.to_vec(),
        form: form.map(|kind| kind.id().to_string()),
    }
}

fn settings_fields(session: &Session) -> Vec<(String, String)> {
    let Some(user) = &session.user else {
        return FormKind::Settings.blank_fields();
    };
    vec![
        ("image".to_string(), user.image.clone().unwrap_or_default()),
        ("username".to_string(), user.username.clone()),
        ("bio".to_string(), user.bio.clone().unwrap_or_default()),
        ("email".to_string(), user.email.clone()),
        ("password".to_string(), String::new()),
    ]
}

fn editor_view(editor: &EditorPage, controls: &mut Vec<Control>) -> FormView {
    let title = if editor.slug.is_some() {
        "Edit Article"
    } else {
        "New Article"
    };
    let Some(draft) = &editor.draft else {
        return form_view(title, &editor.errors, None);
    };

    let fields = vec![
        ("title".to_string(), draft.title.clone()),
        ("description".to_string(), draft.description.clone()),
        ("body".to_string(), draft.body.clone()),
        ("tags".to_string(), draft.tag_list.join(", ")),
    ];
    controls.push(form_control(FormKind::Editor, "Publish Article", fields));
    form_view(title, &editor.errors, Some(FormKind::Editor))
}

fn home_view(state: &AppState, home: &HomePage, controls: &mut Vec<Control>) -> HomeView {
    let logged_in = state.session.is_authenticated();
    let mut tabs = Vec::new();

    if logged_in {
        tabs.push(TabView {
            label: "Your Feed".to_string(),
            active: state.view.tab == FeedTab::Feed,
        });
        controls.push(Control::dispatch(
            "tab-feed",
            "Your Feed",
            AppAction::SelectTab { tab: FeedTab::Feed },
        ));
    }
    tabs.push(TabView {
        label: "Global Feed".to_string(),
        active: state.view.tab == FeedTab::Global,
    });
    controls.push(Control::dispatch(
        "tab-global",
        "Global Feed",
        AppAction::SelectTab {
            tab: FeedTab::Global,
        },
    ));
    if let FeedTab::Tag(tag) = &state.view.tab {
        tabs.push(TabView {
            label: format!("# {tag}"),
            active: true,
        });
    }

    let list = list_view(state, &home.list, controls);

    if let Some(tags) = &home.tags {
        for tag in tags {
            controls.push(Control::dispatch(
                format!("tag-{tag}"),
                tag.clone(),
                AppAction::SelectTab {
                    tab: FeedTab::Tag(tag.clone()),
                },
            ));
        }
    }

    HomeView {
        banner: !logged_in,
        tabs,
        list,
        tags: home.tags.clone(),
    }
}

fn preview(article: &Article) -> ArticlePreview {
    ArticlePreview {
        slug: article.slug.clone(),
        title: article.title.clone(),
        description: article.description.clone(),
        author: article.author.username.clone(),
        image: image_or_default(article.author.image.as_deref()),
        date: format_date(&article.created_at),
        tags: article.tag_list.clone(),
        favorited: article.favorited,
        favorites_count: article.favorites_count,
    }
}

fn list_view(state: &AppState, list: &Loadable<ArticleList>, controls: &mut Vec<Control>) -> ListView {
    let loaded = match list {
        Loadable::Loading => return message_list(LOADING_ARTICLES),
        Loadable::Failed => return message_list(ARTICLES_FAILED),
        Loadable::Ready(loaded) => loaded,
    };
    if loaded.articles.is_empty() {
        return message_list(NO_ARTICLES);
    }

    for article in &loaded.articles {
        controls.push(Control::navigate(
            format!("open-{}", article.slug),
            article.title.clone(),
            format!("/article/{}", article.slug),
        ));
        controls.push(Control::navigate(
            format!("author-{}", article.slug),
            article.author.username.clone(),
            format!("/profile/{}", article.author.username),
        ));
        controls.push(Control::dispatch(
            format!("favorite-{}", article.slug),
            format!("♥ {}", article.favorites_count),
            AppAction::ToggleFavorite {
                slug: article.slug.clone(),
                favorited: article.favorited,
            },
        ));
    }

    let pages = pagination(
        loaded.articles_count,
        state.view.page_size,
        state.view.page_offset,
    );
    for link in &pages {
        controls.push(Control::dispatch(
            format!("page-{}", link.number),
            link.number.to_string(),
            AppAction::SelectPage {
                offset: link.offset,
            },
        ));
    }

    ListView {
        message: None,
        articles: loaded.articles.iter().map(preview).collect(),
        pages,
    }
}

fn message_list(message: &str) -> ListView {
    ListView {
        message: Some(message.to_string()),
        articles: Vec::new(),
        pages: Vec::new(),
    }
}

fn comment_view(session: &Session, comment: &Comment) -> CommentView {
    CommentView {
        id: comment.id,
        body: comment.body.clone(),
        author: comment.author.username.clone(),
        image: image_or_default(comment.author.image.as_deref()),
        date: format_date(&comment.created_at),
        deletable: session.is_user(&comment.author.username),
    }
}

fn article_view(session: &Session, detail: &ArticleDetail, controls: &mut Vec<Control>) -> ArticleView {
    let article = &detail.article;
    let author = &article.author;
    let own = session.is_user(&author.username);

    controls.push(Control::navigate(
        "author-profile",
        author.username.clone(),
        format!("/profile/{}", author.username),
    ));
    if own {
        controls.push(Control::navigate(
            "edit-article",
            "Edit Article",
            format!("/editor/{}", article.slug),
        ));
        controls.push(Control::dispatch(
            "delete-article",
            "Delete Article",
            AppAction::DeleteArticle {
                slug: article.slug.clone(),
            },
        ));
    } else {
        let verb = if author.following { "Unfollow" } else { "Follow" };
        controls.push(Control::dispatch(
            "follow-author",
            format!("{verb} {}", author.username),
            AppAction::ToggleFollow {
                username: author.username.clone(),
                following: author.following,
            },
        ));
        let verb = if article.favorited {
            "Unfavorite"
        } else {
            "Favorite"
        };
        controls.push(Control::dispatch(
            "favorite-article",
            format!("{verb} Article ({})", article.favorites_count),
            AppAction::ToggleFavorite {
                slug: article.slug.clone(),
                favorited: article.favorited,
            },
        ));
    }

    let can_comment = session.is_authenticated();
    if can_comment {
        let kind = FormKind::Comment {
            slug: article.slug.clone(),
        };
        let fields = kind.blank_fields();
        controls.push(form_control(kind, "Post Comment", fields));
    } else {
        controls.push(Control::navigate("link-login", "Sign in", "/login"));
        controls.push(Control::navigate("link-register", "sign up", "/register"));
    }

    let comments: Vec<CommentView> = detail
        .comments
        .iter()
        .map(|comment| comment_view(session, comment))
        .collect();
    for comment in comments.iter().filter(|comment| comment.deletable) {
        controls.push(Control::dispatch(
            format!("delete-comment-{}", comment.id),
            "Delete comment",
            AppAction::DeleteComment {
                slug: article.slug.clone(),
                id: comment.id,
            },
        ));
    }

    ArticleView {
        title: article.title.clone(),
        body: article.body.clone(),
        tags: article.tag_list.clone(),
        author: author.username.clone(),
        image: image_or_default(author.image.as_deref()),
        date: format_date(&article.created_at),
        following: author.following,
        favorited: article.favorited,
        favorites_count: article.favorites_count,
        own,
        comments,
        can_comment,
    }
}

fn profile_view(
    state: &AppState,
    page: &ProfilePage,
    profile: &Profile,
    controls: &mut Vec<Control>,
) -> ProfileView {
    let own = state.session.is_user(&profile.username);

    if own {
        controls.push(Control::navigate(
            "edit-settings",
            "Edit Profile Settings",
            "/settings",
        ));
    } else {
        let verb = if profile.following { "Unfollow" } else { "Follow" };
        controls.push(Control::dispatch(
            "follow-profile",
            format!("{verb} {}", profile.username),
            AppAction::ToggleFollow {
                username: profile.username.clone(),
                following: profile.following,
            },
        ));
    }
    controls.push(Control::navigate(
        "tab-my-articles",
        "My Articles",
        format!("/profile/{}", profile.username),
    ));
    controls.push(Control::navigate(
        "tab-favorited-articles",
        "Favorited Articles",
        format!("/profile/{}/favorites", profile.username),
    ));

    ProfileView {
        username: profile.username.clone(),
        bio: profile.bio.clone(),
        image: image_or_default(profile.image.as_deref()),
        following: profile.following,
        own,
        tab: page.tab,
        list: list_view(state, &page.list, controls),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)] // Tests are allowed to panic on failures

    use super::*;
    use crate::state::ArticlePage;
    use crate::views::{Intent, screen};
    use chrono::{DateTime, Utc};
    use conduit_api::types::User;

    fn author(username: &str) -> Profile {
        Profile {
            username: username.to_string(),
            bio: None,
            image: None,
            following: false,
        }
    }

    fn article(slug: &str, by: &str) -> Article {
        Article {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            body: "# Hello".to_string(),
            tag_list: vec!["rust".to_string()],
            created_at: DateTime::<Utc>::from_timestamp(1_736_078_400, 0).unwrap_or_default(),
            updated_at: None,
            favorited: false,
            favorites_count: 2,
            author: author(by),
        }
    }

    fn session_for(username: &str) -> Session {
        Session {
            token: Some(format!("token-{username}")),
            user: Some(User {
                username: username.to_string(),
                email: format!("{username}@conduit.test"),
                bio: None,
                image: None,
                token: format!("token-{username}"),
            }),
            pending: false,
        }
    }

    fn article_state(viewer: Option<&str>, by: &str) -> AppState {
        let mut state = AppState::default();
        if let Some(viewer) = viewer {
            state.session = session_for(viewer);
        }
        state.page = Page::Article(ArticlePage {
            slug: "dragons".into(),
            detail: Loadable::Ready(ArticleDetail {
                article: article("dragons", by),
                comments: vec![
                    Comment {
                        id: 2,
                        body: "mine".into(),
                        created_at: DateTime::<Utc>::from_timestamp(1_736_078_500, 0)
                            .unwrap_or_default(),
                        updated_at: None,
                        author: author("bob"),
                    },
                    Comment {
                        id: 1,
                        body: "theirs".into(),
                        created_at: DateTime::<Utc>::from_timestamp(1_736_078_450, 0)
                            .unwrap_or_default(),
                        updated_at: None,
                        author: author("carol"),
                    },
                ],
            }),
        });
        state
    }

    #[test]
    fn authors_see_edit_and_delete() {
        let screen = screen(&article_state(Some("alice"), "alice"));
        assert!(screen.control("edit-article").is_some());
        assert!(screen.control("delete-article").is_some());
        assert!(screen.control("follow-author").is_none());
        assert!(screen.control("favorite-article").is_none());
    }

    #[test]
    fn readers_see_follow_and_favorite() {
        let screen = screen(&article_state(Some("bob"), "alice"));
        assert!(screen.control("edit-article").is_none());
        assert!(matches!(
            screen.control("favorite-article").map(|c| &c.intent),
            Some(Intent::Dispatch(AppAction::ToggleFavorite { favorited: false, .. }))
        ));
        assert!(screen.control("delete-comment-2").is_some());
        assert!(screen.control("delete-comment-1").is_none());
        assert!(screen.control("form-comment").is_some());
    }

    #[test]
    fn anonymous_readers_get_no_comment_form() {
        let screen = screen(&article_state(None, "alice"));
        let Body::Article(view) = &screen.body else {
            panic!("expected an article body");
        };
        assert!(!view.can_comment);
        assert_eq!(view.date, "January 5, 2025");
        assert_eq!(view.body, "# Hello");
        assert!(screen.control("form-comment").is_none());
    }

    #[test]
    fn failed_article_is_terminal() {
        let mut state = AppState::default();
        state.page = Page::Article(ArticlePage {
            slug: "missing".into(),
            detail: Loadable::Failed,
        });
        assert_eq!(
            screen(&state).body,
            Body::Message(ARTICLE_NOT_FOUND.to_string())
        );
    }

    #[test]
    fn list_messages() {
        let mut state = AppState::default();
        state.page = Page::Home(HomePage::default());
        let Body::Home(home) = screen(&state).body else {
            panic!("expected the home page");
        };
        assert_eq!(home.list.message.as_deref(), Some(LOADING_ARTICLES));
        assert!(home.banner);

        state.page = Page::Home(HomePage {
            tags: Some(vec![]),
            list: Loadable::Ready(ArticleList::default()),
        });
        let Body::Home(home) = screen(&state).body else {
            panic!("expected the home page");
        };
        assert_eq!(home.list.message.as_deref(), Some(NO_ARTICLES));
    }

    #[test]
    fn tag_tab_is_shown_while_filtering() {
        let mut state = AppState::default();
        state.session = session_for("alice");
        state.view.tab = FeedTab::Tag("rust".into());
        state.page = Page::Home(HomePage {
            tags: Some(vec!["rust".into()]),
            list: Loadable::Failed,
        });
        let screen = screen(&state);
        let Body::Home(home) = &screen.body else {
            panic!("expected the home page");
        };
        let labels: Vec<_> = home.tabs.iter().map(|tab| tab.label.as_str()).collect();
        assert_eq!(labels, vec!["Your Feed", "Global Feed", "# rust"]);
        assert!(!home.banner);
        assert_eq!(home.list.message.as_deref(), Some(ARTICLES_FAILED));
        assert!(screen.control("tag-rust").is_some());
    }
}
