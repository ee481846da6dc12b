//! # Conduit API Client
//!
//! Typed client for the Conduit (RealWorld) REST backend: users, articles,
//! comments, profiles and tags.
//!
//! ## Example
//!
//! ```no_run
//! use conduit_api::{ArticleQuery, ConduitApi, HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from the CONDUIT_API_URL environment variable
//!     let client = HttpClient::from_env()?;
//!
//!     let page = client.list_articles(ArticleQuery::page(10, 0)).await?;
//!     println!("{} articles", page.articles_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Conventions
//!
//! - `Authorization: Token <jwt>` is sent only when the client carries a token
//! - 204 responses decode to "no value" without reading the body
//! - Non-success responses become [`ApiError::Api`] with the server's
//!   field-keyed messages

pub mod client;
pub mod error;
pub mod paths;
pub mod resources;
pub mod types;

// Re-export main types for convenience
pub use client::HttpClient;
pub use error::{ApiError, ValidationErrors};
pub use resources::ConduitApi;
pub use types::{
    Article, ArticleDraft, ArticleList, ArticleQuery, Comment, LoginUser, NewUser, Profile, User,
    UserPatch,
};
