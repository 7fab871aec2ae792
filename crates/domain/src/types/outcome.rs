//! Call outcomes
//!
//! Every call against the remote platform resolves to a [`CallOutcome`].
//! Failures are values carrying a [`FailureKind`] discriminant; call sites
//! decide for themselves whether a failure means "no data" or "error".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::response::{ApiResponse, ResponseEnvelope};

/// Result of one call through a request executor.
pub type CallOutcome = Result<ApiResponse, CallFailure>;

/// What went wrong with a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A body was missing or could not be parsed.
    Decode,
    /// No response reached us (DNS, connection reset, timeout).
    Transport,
    /// The platform answered with a non-2xx status.
    Http,
    /// The mutation token could not be acquired before a mutating call.
    Token,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Transport => "transport",
            Self::Http => "http",
            Self::Token => "token",
        }
    }
}

/// A failed call, described as a value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label}: {message}")]
pub struct CallFailure {
    pub kind: FailureKind,
    /// Context label, usually `"<METHOD> <url>"`.
    pub label: String,
    pub message: String,
    /// The response, when one was received.
    pub envelope: Option<ResponseEnvelope>,
}

impl CallFailure {
    /// No response was received.
    #[must_use]
    pub fn transport(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            label: label.into(),
            message: message.into(),
            envelope: None,
        }
    }

    /// The server answered with a non-2xx status.
    #[must_use]
    pub fn http(label: impl Into<String>, envelope: ResponseEnvelope) -> Self {
        let message = format!("{} {}", envelope.status, envelope.status_text);
        Self { kind: FailureKind::Http, label: label.into(), message, envelope: Some(envelope) }
    }

    /// The body could not be decoded as JSON.
    #[must_use]
    pub fn decode(label: impl Into<String>, error: &DecodeError) -> Self {
        Self {
            kind: FailureKind::Decode,
            label: label.into(),
            message: error.to_string(),
            envelope: None,
        }
    }

    /// A mutation was refused locally because no token could be acquired.
    #[must_use]
    pub fn token(label: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Token,
            label: label.into(),
            message: "mutation token unavailable".to_string(),
            envelope: None,
        }
    }

    /// HTTP status of the rejected call, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.envelope.as_ref().map(|envelope| envelope.status)
    }

    /// Header from the rejected call's response, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.envelope.as_ref().and_then(|envelope| envelope.header(name))
    }
}

/// Why a body could not be turned into a structured value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("response has no body")]
    Missing,

    #[error("failed to parse JSON: {0}")]
    Syntax(String),
}
