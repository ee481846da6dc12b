//! Endpoint paths, relative to the API base URL
//!
//! The backend routes every endpoint with a trailing slash.

use crate::types::ArticleQuery;

/// `POST /users/login/`
pub const LOGIN: &str = "/users/login/";
/// `POST /users/`
pub const USERS: &str = "/users/";
/// `GET|PUT /user/`
pub const CURRENT_USER: &str = "/user/";
/// `GET /tags/`
pub const TAGS: &str = "/tags/";
/// `POST /articles/`
pub const ARTICLES: &str = "/articles/";

/// `GET /articles/?...`
#[must_use]
pub fn article_list(query: &ArticleQuery) -> String {
    format!("/articles/?{}", query.to_query_string())
}

/// `GET /articles/feed/?limit=&offset=`
#[must_use]
pub fn feed(limit: u64, offset: u64) -> String {
    format!("/articles/feed/?{}", ArticleQuery::page(limit, offset).to_query_string())
}

/// `GET|PUT|DELETE /articles/{slug}/`
#[must_use]
pub fn article(slug: &str) -> String {
    format!("/articles/{slug}/")
}

/// `POST|DELETE /articles/{slug}/favorite/`
#[must_use]
pub fn favorite(slug: &str) -> String {
    format!("/articles/{slug}/favorite/")
}

/// `GET|POST /articles/{slug}/comments/`
#[must_use]
pub fn comments(slug: &str) -> String {
    format!("/articles/{slug}/comments/")
}

/// `DELETE /articles/{slug}/comments/{id}/`
#[must_use]
pub fn comment(slug: &str, id: u64) -> String {
    format!("/articles/{slug}/comments/{id}/")
}

/// `GET /profiles/{username}/`
#[must_use]
pub fn profile(username: &str) -> String {
    format!("/profiles/{username}/")
}

/// `POST|DELETE /profiles/{username}/follow/`
#[must_use]
pub fn follow(username: &str) -> String {
    format!("/profiles/{username}/follow/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths_keep_trailing_slash() {
        assert_eq!(comment("dragons", 7), "/articles/dragons/comments/7/");
        assert_eq!(follow("alice"), "/profiles/alice/follow/");
        assert_eq!(feed(10, 0), "/articles/feed/?limit=10&offset=0");
    }
}
