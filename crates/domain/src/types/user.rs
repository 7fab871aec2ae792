//! Platform user identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric platform user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Pick the id a user-scoped call should target
    ///
    /// A caller-supplied id wins when it is positive; zero, negatives and
    /// `None` fall back to the session's own id.
    #[must_use]
    pub fn resolve(provided: Option<i64>, own: UserId) -> UserId {
        match provided.filter(|id| *id > 0).and_then(|id| u64::try_from(id).ok()) {
            Some(id) => UserId(id),
            None => own,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
