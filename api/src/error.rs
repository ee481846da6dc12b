//! Error types for the Conduit API client

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the Conduit backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Missing `CONDUIT_API_URL` environment variable
    #[error("Missing CONDUIT_API_URL environment variable")]
    MissingApiUrl,

    /// The request never produced a response (connection, DNS, TLS...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// A success response carried a body that could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// A body was required but the server answered 204 No Content
    #[error("Expected a response body but the server returned none")]
    EmptyResponse,

    /// The server answered with a non-success status
    ///
    /// `errors` holds the `{errors: {...}}` payload when the server sent one.
    #[error("API error (status {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Field-keyed validation messages
        errors: Option<ValidationErrors>,
    },
}

impl ApiError {
    /// HTTP status code, if the server answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the server rejected our credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Field-keyed messages carried by the error, if any
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Api { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}

/// Body of a failed request: `{"errors": {"field": ["message", ...]}}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// The field-keyed messages
    pub errors: ValidationErrors,
}

/// Field-keyed validation messages
///
/// The backend sometimes sends a bare string instead of a list
/// (`{"detail": "Not found."}`); both decode to a list here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Build from `(field, message)` pairs
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, message) in pairs {
            map.entry(field.into()).or_default().push(message.into());
        }
        Self(map)
    }

    /// Messages for one field
    #[must_use]
    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when no field carries a message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Flatten into display lines: `"{field} {message}"`
    #[must_use]
    pub fn to_messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field} {message}"))
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Messages {
            One(String),
            Many(Vec<String>),
        }

        let raw = BTreeMap::<String, Messages>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(field, messages)| {
                    let messages = match messages {
                        Messages::One(message) => vec![message],
                        Messages::Many(messages) => messages,
                    };
                    (field, messages)
                })
                .collect(),
        ))
    }
}
