//! Session material: the credential cookie and the mutation token
//!
//! Neither value is ever printed. `Debug` output is redacted and the
//! credential is zeroed when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::SESSION_COOKIE_NAME;

/// Opaque session credential
///
/// Owned by the session that created it and lent (`&Credential`) to every
/// request. Never serialized.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    inner: String,
}

impl Credential {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { inner: value.into() }
    }

    /// Expose the raw credential
    ///
    /// The exposed value should not be stored or logged.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Value of the `Cookie` header carrying this credential.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.inner)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("inner", &"[REDACTED]").finish()
    }
}

/// Anti-forgery token required on state-changing calls
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MutationToken(String);

impl MutationToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MutationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MutationToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_prefixes_cookie_name() {
        let credential = Credential::new("abc123");
        assert_eq!(credential.cookie_header(), ".ROBLOSECURITY=abc123");
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new("super-secret");
        let token = MutationToken::new("csrf-secret");

        let rendered = format!("{credential:?} {token:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("csrf-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
