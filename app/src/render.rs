//! Plain-text rendering of a [`Screen`]
//!
//! Used by the terminal shell. Article bodies are printed as raw markdown.

use crate::views::{
    ArticlePreview, ArticleView, Body, Control, FormView, HomeView, Intent, ListView, NavItem,
    ProfileView, Screen,
};
use crate::route::ProfileTab;
use std::fmt::Write;

/// Render a screen as text
#[must_use]
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    nav(&mut out, &screen.nav);
    if let Some(alert) = &screen.alert {
        let _ = writeln!(out, "!! {alert}");
    }
    out.push('\n');
    body(&mut out, &screen.body);
    out.push('\n');
    controls(&mut out, &screen.controls);
    out
}

fn nav(out: &mut String, items: &[NavItem]) {
    let links: Vec<String> = items
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "conduit | {}", links.join(" | "));
}

fn body(out: &mut String, body: &Body) {
    match body {
        Body::Blank => {},
        Body::Loading => {
            let _ = writeln!(out, "Loading...");
        },
        Body::Message(message) => {
            let _ = writeln!(out, "{message}");
        },
        Body::Home(home) => home_page(out, home),
        Body::Form(form) => form_page(out, form),
        Body::Article(article) => article_page(out, article),
        Body::Profile(profile) => profile_page(out, profile),
    }
}

fn home_page(out: &mut String, home: &HomeView) {
    if home.banner {
        let _ = writeln!(out, "conduit\nA place to share your knowledge.\n");
    }
    let tabs: Vec<String> = home
        .tabs
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                tab.label.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" | "));
    list(out, &home.list);

    match &home.tags {
        None => {
            let _ = writeln!(out, "\nPopular Tags: loading...");
        },
        Some(tags) => {
            let _ = writeln!(out, "\nPopular Tags: {}", tags.join(" "));
        },
    }
}

fn preview(out: &mut String, article: &ArticlePreview) {
    let _ = writeln!(
        out,
        "\n{} ({}) - {}  ♥ {}{}",
        article.author,
        article.image,
        article.date,
        article.favorites_count,
        if article.favorited { " (favorited)" } else { "" }
    );
    let _ = writeln!(out, "  {}", article.title);
    let _ = writeln!(out, "  {}", article.description);
    if !article.tags.is_empty() {
        let _ = writeln!(out, "  tags: {}", article.tags.join(", "));
    }
}

fn list(out: &mut String, list: &ListView) {
    if let Some(message) = &list.message {
        let _ = writeln!(out, "\n{message}");
        return;
    }
    for article in &list.articles {
        preview(out, article);
    }
    if !list.pages.is_empty() {
        let pages: Vec<String> = list
            .pages
            .iter()
            .map(|page| {
                if page.active {
                    format!("[{}]", page.number)
                } else {
                    page.number.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "\npages: {}", pages.join(" "));
    }
}

fn form_page(out: &mut String, form: &FormView) {
    let _ = writeln!(out, "{}", form.title);
    for error in &form.errors {
        let _ = writeln!(out, "  * {error}");
    }
    if form.form.is_none() {
        let _ = writeln!(out, "Loading...");
    }
}

fn article_page(out: &mut String, article: &ArticleView) {
    let _ = writeln!(out, "{}", article.title);
    let _ = writeln!(
        out,
        "{} ({}) - {}{}",
        article.author,
        article.image,
        article.date,
        if article.following { " (following)" } else { "" }
    );
    let _ = writeln!(
        out,
        "♥ {}{}\n",
        article.favorites_count,
        if article.favorited { " (favorited)" } else { "" }
    );
    let _ = writeln!(out, "{}\n", article.body);
    if !article.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", article.tags.join(", "));
    }
    if !article.can_comment {
        let _ = writeln!(out, "\nSign in or sign up to add comments on this article.");
    }
    for comment in &article.comments {
        let _ = writeln!(out, "\n{}", comment.body);
        let _ = writeln!(
            out,
            "  - {} ({}) {}",
            comment.author, comment.image, comment.date
        );
    }
}

fn profile_page(out: &mut String, profile: &ProfileView) {
    let _ = writeln!(out, "{} ({})", profile.username, profile.image);
    if let Some(bio) = &profile.bio {
        let _ = writeln!(out, "{bio}");
    }
    let (mine, favorites) = match profile.tab {
        ProfileTab::My => ("[My Articles]", "Favorited Articles"),
        ProfileTab::Favorites => ("My Articles", "[Favorited Articles]"),
    };
    let _ = writeln!(out, "\n{mine} | {favorites}");
    list(out, &profile.list);
}

fn controls(out: &mut String, controls: &[Control]) {
    let _ = writeln!(out, "controls:");
    for control in controls {
        let kind = match &control.intent {
            Intent::Navigate(path) => format!("go {path}"),
            Intent::Dispatch(_) => "press".to_string(),
            Intent::Form { fields, .. } => {
                let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
                format!("submit [{}]", names.join(", "))
            },
        };
        let _ = writeln!(out, "  {:<28} {} ({kind})", control.id, control.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, HomePage, Page};
    use crate::views::screen;

    #[test]
    fn active_nav_item_is_bracketed() {
        let mut state = AppState::default();
        state.location = "/login".into();
        state.page = Page::Login { errors: vec!["email can't be blank".into()] };
        let text = render(&screen(&state));

        assert!(text.starts_with("conduit | Home | [Sign in] | Sign up"));
        assert!(text.contains("  * email can't be blank"));
        assert!(text.contains("form-login"));
    }

    #[test]
    fn loading_home_page() {
        let mut state = AppState::default();
        state.page = Page::Home(HomePage::default());
        let text = render(&screen(&state));

        assert!(text.contains("A place to share your knowledge."));
        assert!(text.contains("Loading articles..."));
        assert!(text.contains("Popular Tags: loading..."));
    }
}
