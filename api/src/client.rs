//! HTTP client for the Conduit backend

use crate::error::{ApiError, ErrorBody, Result};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "CONDUIT_API_URL";

/// Thin wrapper over `reqwest` that speaks the Conduit conventions
///
/// Cloning is cheap; the connection pool is shared between clones. A client
/// is bound to at most one auth token, see [`HttpClient::with_token`].
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client with the base URL from the environment
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiUrl` if `CONDUIT_API_URL` is not set
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV).map_err(|_| ApiError::MissingApiUrl)?;

        Ok(Self::new(base_url))
    }

    /// Create an unauthenticated client for `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// A clone of this client bound to `token`
    #[must_use]
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    /// The base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bound token, if any
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Send a request and return the decoded JSON body
    ///
    /// A 204 response yields `Ok(None)` without touching the body.
    ///
    /// # Errors
    ///
    /// - `ApiError::RequestFailed` when no response arrives
    /// - `ApiError::Api` for any non-success status
    /// - `ApiError::ResponseParseFailed` when a success body is not JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        tracing::debug!(%method, path, authenticated = self.token.is_some(), "Sending request");

        let mut request = self
            .client
            .request(method.clone(), format!("{}{path}", self.base_url))
            .header("content-type", "application/json");

        if let Some(token) = &self.token {
            request = request.header("authorization", format!("Token {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => response
                .json::<Value>()
                .await
                .map(Some)
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            status => {
                let text = response.text().await.unwrap_or_default();
                let errors = serde_json::from_str::<ErrorBody>(&text)
                    .ok()
                    .map(|body| body.errors);

                tracing::debug!(%method, path, status = status.as_u16(), "Request rejected");

                Err(ApiError::Api {
                    status: status.as_u16(),
                    errors,
                })
            },
        }
    }

    /// Send a request and decode the body into `T`
    ///
    /// # Errors
    ///
    /// Everything [`HttpClient::request`] returns, plus
    /// `ApiError::EmptyResponse` when the server answered 204.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let value = self
            .request(method, path, body)
            .await?
            .ok_or(ApiError::EmptyResponse)?;

        serde_json::from_value(value).map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }
}
