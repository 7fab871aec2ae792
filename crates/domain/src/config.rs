//! Configuration management

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_PROBE_URL, DEFAULT_USER_AGENT,
};

/// Client configuration
///
/// Every section falls back to its defaults, so an empty TOML/JSON document
/// is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Skip TLS certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

/// Mutation token acquisition configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Mutating endpoint that rejects token-less calls with a fresh token.
    pub token_probe_url: String,
}

/// Pagination safety limits
///
/// `None` disables the respective cap. A cap of `0` means the same thing:
/// it is read as `None` from documents and dropped by [`Self::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    #[serde(deserialize_with = "zero_as_none")]
    pub max_pages: Option<usize>,
    #[serde(deserialize_with = "zero_as_none")]
    pub max_items: Option<usize>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_probe_url: DEFAULT_TOKEN_PROBE_URL.to_string() }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_pages: Some(DEFAULT_MAX_PAGES), max_items: None }
    }
}

impl PaginationConfig {
    /// Limits that never stop a collection early.
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_pages: None, max_items: None }
    }

    /// Same limits with every `Some(0)` cap turned into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            max_pages: self.max_pages.filter(|max| *max > 0),
            max_items: self.max_items.filter(|max| *max > 0),
        }
    }
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<usize>::deserialize(deserializer)?.filter(|max| *max > 0))
}
