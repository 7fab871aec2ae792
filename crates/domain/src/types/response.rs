//! Response values produced by a request executor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw response body
///
/// `Json` when the transport already parsed the body, `Text` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawBody {
    Text(String),
    Json(Value),
}

impl RawBody {
    /// Wrap a body read off the wire
    ///
    /// Empty bodies become `None`. With `prefer_json` a body that parses as
    /// JSON is returned pre-parsed; anything else stays text.
    #[must_use]
    pub fn from_wire(text: String, prefer_json: bool) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        if prefer_json {
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                return Some(Self::Json(value));
            }
        }
        Some(Self::Text(text))
    }
}

/// Complete HTTP response: status, headers, and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub status_text: String,
    /// Header names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: Option<RawBody>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self { status, status_text: status_text.into(), headers: BTreeMap::new(), body: None }
    }

    /// Add a header; the name is stored lowercase.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<RawBody>) -> Self {
        self.body = body;
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Successful call result, shaped by `RequestSpec::full_response`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Body(Option<RawBody>),
    Envelope(ResponseEnvelope),
}

impl ApiResponse {
    /// Body of the response regardless of shape.
    #[must_use]
    pub fn body(&self) -> Option<&RawBody> {
        match self {
            Self::Body(body) => body.as_ref(),
            Self::Envelope(envelope) => envelope.body.as_ref(),
        }
    }

    /// Envelope, for calls made with `full_response`.
    #[must_use]
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Body(_) => None,
            Self::Envelope(envelope) => Some(envelope),
        }
    }
}
