//! Error types for the places crate.
//!
//! [`PlacesError`] is `Clone` so the manager can keep the value in its
//! state and hand the same value back to the caller of a details fetch.

use thiserror::Error;

/// Errors that can occur while building a lookup or talking to Google.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacesError {
    /// No API key (or a blank one) was supplied at construction.
    #[error("API Key must be provided.")]
    MissingApiKey,

    /// The requested platform has no lookup strategy in this build.
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform {
        /// Platform name, e.g. "web"
        platform: String,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("{message}")]
    Request {
        /// Human readable failure description
        message: String,
    },

    /// Google answered with a non-success HTTP status or API status.
    #[error("{message}")]
    Api {
        /// HTTP status code or API status string
        status: String,
        /// Message extracted from the error payload
        message: String,
    },

    /// The response body could not be decoded.
    #[error("{message}")]
    InvalidResponse {
        /// Decoder error description
        message: String,
    },
}

impl PlacesError {
    pub(crate) fn request(context: &str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("{}: request timed out", context)
        } else {
            format!("{}: {}", context, err)
        };
        Self::Request { message }
    }

    pub(crate) fn api(context: &str, status: impl Into<String>, detail: &str) -> Self {
        Self::Api {
            status: status.into(),
            message: format!("{}: {}", context, detail),
        }
    }

    pub(crate) fn invalid_response(context: &str, err: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: format!("{}: {}", context, err),
        }
    }
}
