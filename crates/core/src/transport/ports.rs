//! Port interface for issuing calls against the remote platform
//!
//! The infrastructure layer provides the HTTP-backed implementation; tests
//! provide scripted ones.

use async_trait::async_trait;
use rsblox_domain::{CallOutcome, RequestSpec};

/// Issues one call and resolves to its outcome
///
/// Implementations must never panic and never surface a failure any other
/// way than through the returned [`CallOutcome`]. Every unexpected failure
/// is reported once through [`crate::failure::classify`] before it is
/// returned.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute `spec`
    ///
    /// Headers are derived from the spec: the session cookie when a
    /// credential is present, the mutation-token header when a token is
    /// present. A non-2xx response is a failure of kind `Http` carrying the
    /// full envelope; a success resolves to the body or to the envelope
    /// depending on `spec.full_response`.
    async fn execute(&self, spec: &RequestSpec<'_>) -> CallOutcome;
}
