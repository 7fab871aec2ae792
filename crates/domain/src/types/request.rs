//! Request description handed to a request executor
//!
//! A `RequestSpec` is an immutable value built per call. It borrows the
//! session credential instead of copying it, so a spec never outlives the
//! session it was built from.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::credential::{Credential, MutationToken};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call against the remote platform described as plain data.
#[derive(Debug, Clone)]
pub struct RequestSpec<'a> {
    pub method: HttpMethod,
    pub url: String,
    pub credential: Option<&'a Credential>,
    pub token: Option<MutationToken>,
    pub body: Option<Value>,
    /// Resolve to the full envelope (status, headers, body) instead of the
    /// body alone.
    pub full_response: bool,
    /// The call is expected to be rejected (token probe); its failure is
    /// logged at debug level only.
    pub expect_rejection: bool,
}

impl<'a> RequestSpec<'a> {
    /// Anonymous, body-only request without payload.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            credential: None,
            token: None,
            body: None,
            full_response: false,
            expect_rejection: false,
        }
    }

    /// Anonymous `GET`; chain the `with_*` methods for the rest.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Anonymous `POST`.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Anonymous `PATCH`.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    /// Anonymous `DELETE`.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Send the session cookie for `credential`.
    #[must_use]
    pub fn with_credential(mut self, credential: &'a Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Send the mutation token header when `token` is set.
    #[must_use]
    pub fn with_token(mut self, token: Option<MutationToken>) -> Self {
        self.token = token;
        self
    }

    /// JSON payload; `None` sends no body.
    #[must_use]
    pub fn with_json(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Resolve to the whole [`crate::ResponseEnvelope`] instead of the body.
    #[must_use]
    pub fn full_response(mut self) -> Self {
        self.full_response = true;
        self
    }

    /// Mark a non-2xx answer as the normal outcome; it is logged at debug
    /// level. Transport failures are still logged as errors.
    #[must_use]
    pub fn expect_rejection(mut self) -> Self {
        self.expect_rejection = true;
        self
    }

    /// Same request against another URL (used for per-page URLs).
    #[must_use]
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self { url: url.into(), ..self.clone() }
    }

    /// Context label used in diagnostics: `"<METHOD> <url>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}
