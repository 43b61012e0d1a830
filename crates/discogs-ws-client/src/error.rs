// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscogsError>;

#[derive(Debug, Error)]
pub enum DiscogsError {
    /// No usable response: connection failure, timeout, non-success status
    /// or a body that could not be read.
    #[error("could not retrieve response: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body was received but it is not valid JSON.
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The JSON document lacks the envelope key for the endpoint, or the
    /// unwrapped document does not fit the expected result type.
    #[error("unexpected response shape at `{path}`: {reason}")]
    UnexpectedShape { path: String, reason: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid user agent: {0:?}")]
    InvalidUserAgent(String),

    #[error("invalid search type: {0:?} (expected one of all, releases, artists, labels)")]
    InvalidSearchType(String),

    #[error("invalid page number: {0} (pages start at 1)")]
    InvalidPage(u32),

    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl DiscogsError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DiscogsError::Transport(error) => error.status(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, DiscogsError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, DiscogsError::Decode(_))
    }

    pub fn is_unexpected_shape(&self) -> bool {
        matches!(self, DiscogsError::UnexpectedShape { .. })
    }
}
