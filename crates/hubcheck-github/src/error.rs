//! Error types for GitHub API access.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the GitHub client and the domain accessors.
#[derive(Debug, Clone, Error)]
pub enum GitHubError {
    /// GitHub answered with an unexpected status code.
    #[error("unexpected HTTP response code: {status} ({detail}){hint}", hint = auth_hint(.status))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
        /// `message` field of GitHub's error document, if the body decoded.
        message: Option<String>,
        /// `documentation_url` field of GitHub's error document, if present.
        documentation_url: Option<String>,
        /// Human-readable summary used in the error text.
        detail: String,
    },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// A 200 response could not be decoded into the expected shape.
    #[error("failed to decode GitHub response ({reason}; {body})")]
    Decode {
        /// Decoder error text.
        reason: String,
        /// Raw response body.
        body: String,
    },

    /// The client was given an unusable configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// An error annotated with the operation that produced it.
    #[error("{context} ({source})")]
    Context {
        /// What was being attempted.
        context: String,
        /// Underlying failure.
        #[source]
        source: Box<GitHubError>,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    documentation_url: Option<String>,
}

fn auth_hint(status: &u16) -> &'static str {
    match status {
        401 | 403 => "; check that your GitHub token is valid and has the required scopes",
        _ => "",
    }
}

impl GitHubError {
    /// Classify a non-success response, decoding GitHub's error document when possible.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let (message, documentation_url) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(details) => (details.message, details.documentation_url),
            Err(_) => (None, None),
        };
        let detail = match (&message, &documentation_url) {
            (Some(message), Some(doc)) => format!("{message}; {doc}"),
            (Some(message), None) => message.clone(),
            _ => body.clone(),
        };
        Self::Api {
            status,
            body,
            message,
            documentation_url,
            detail,
        }
    }

    /// Wrap this error with a description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// HTTP status code of the underlying API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, GitHubError>;
