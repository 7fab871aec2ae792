//! Token state machine

use rsblox_domain::MutationToken;

/// State of one session's mutation token
///
/// ```text
/// NoToken ──ensure──▶ Acquiring ──header found──▶ TokenPresent
///    ▲                    │
///    │                    └──no header──▶ AcquisitionFailed ──ensure──▶ Acquiring
///    └──────── invalidate ────────────────────────────────────────────┘
/// ```
///
/// `AcquisitionFailed` is not sticky: the next `ensure_token` probes again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenState {
    #[default]
    NoToken,
    Acquiring,
    TokenPresent(MutationToken),
    AcquisitionFailed,
}

impl TokenState {
    /// Token held in `TokenPresent`.
    #[must_use]
    pub fn token(&self) -> Option<&MutationToken> {
        match self {
            Self::TokenPresent(token) => Some(token),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::TokenPresent(_))
    }

    /// Enter `Acquiring` unless a token is already cached.
    ///
    /// Returns `false` when the state holds a token and no probe is needed.
    pub fn begin_acquire(&mut self) -> bool {
        if self.is_present() {
            return false;
        }
        *self = Self::Acquiring;
        true
    }

    /// Record the result of a probe.
    ///
    /// A found token always wins (concurrent probes converge on the same
    /// value). A failed probe never overwrites a token another probe stored.
    pub fn finish_acquire(&mut self, probed: Option<MutationToken>) {
        match probed {
            Some(token) => *self = Self::TokenPresent(token),
            None if !self.is_present() => *self = Self::AcquisitionFailed,
            None => {}
        }
    }
}
