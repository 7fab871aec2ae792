//! Platform wire constants
//!
//! Centralized location for header names, cookie names, and defaults used
//! when talking to the remote platform.

/// Cookie carrying the session credential.
pub const SESSION_COOKIE_NAME: &str = ".ROBLOSECURITY";

/// Header carrying the anti-forgery mutation token, both on requests and on
/// the rejection that hands out a fresh token.
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// Mutating endpoint probed without a token to obtain one.
pub const DEFAULT_TOKEN_PROBE_URL: &str = "https://auth.roblox.com/v2/logout";

// Pagination wire format
pub const CURSOR_QUERY_PARAM: &str = "cursor";
pub const PAGE_DATA_FIELD: &str = "data";
pub const PAGE_CURSOR_FIELD: &str = "nextPageCursor";

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("rsblox/", env!("CARGO_PKG_VERSION"));

// Pagination safety valve
pub const DEFAULT_MAX_PAGES: usize = 1000;
