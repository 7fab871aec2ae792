//! Session auth context: credential plus lazily acquired mutation token

use rsblox_domain::constants::CSRF_TOKEN_HEADER;
use rsblox_domain::{AuthConfig, CallOutcome, Credential, MutationToken, RequestSpec};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::state::TokenState;
use crate::transport::RequestExecutor;

/// Owns one session's credential and its cached mutation token
///
/// The token is written only by [`AuthContext::ensure_token`] and read by
/// every authenticated call. Two concurrent `ensure_token` calls made before
/// a token exists may both probe; both converge on a cached token.
pub struct AuthContext {
    credential: Credential,
    probe_url: String,
    state: RwLock<TokenState>,
}

impl AuthContext {
    /// Context with no token yet; the first `ensure_token` probes `probe_url`.
    #[must_use]
    pub fn new(credential: Credential, probe_url: impl Into<String>) -> Self {
        Self { credential, probe_url: probe_url.into(), state: RwLock::new(TokenState::NoToken) }
    }

    /// Context probing `config.token_probe_url`.
    #[must_use]
    pub fn from_config(credential: Credential, config: &AuthConfig) -> Self {
        Self::new(credential, config.token_probe_url.clone())
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    #[must_use]
    pub fn probe_url(&self) -> &str {
        &self.probe_url
    }

    /// Snapshot of the current token state.
    pub async fn state(&self) -> TokenState {
        self.state.read().await.clone()
    }

    /// Cached token, if one has been acquired.
    pub async fn token(&self) -> Option<MutationToken> {
        self.state.read().await.token().cloned()
    }

    /// Make sure a mutation token is cached
    ///
    /// Returns `true` immediately, without network traffic, when a token is
    /// already cached. Otherwise probes the configured endpoint once and
    /// returns whether a token was found. A failure is not remembered: the
    /// next call probes again.
    #[instrument(skip_all, fields(probe_url = %self.probe_url))]
    pub async fn ensure_token(&self, executor: &dyn RequestExecutor) -> bool {
        if !self.state.write().await.begin_acquire() {
            return true;
        }

        let probed = self.probe(executor).await;
        let acquired = probed.is_some();
        self.state.write().await.finish_acquire(probed);

        if acquired {
            info!("mutation token acquired");
        }
        acquired
    }

    /// Drop the cached token so the next `ensure_token` probes again.
    pub async fn invalidate(&self) {
        *self.state.write().await = TokenState::NoToken;
        debug!("mutation token invalidated");
    }

    async fn probe(&self, executor: &dyn RequestExecutor) -> Option<MutationToken> {
        let spec = RequestSpec::post(self.probe_url.as_str())
            .with_credential(&self.credential)
            .full_response()
            .expect_rejection();

        // The executor has already classified a failed probe.
        let outcome = executor.execute(&spec).await;
        let token = extract_token(&outcome);

        if token.is_none() {
            let status = match &outcome {
                Ok(response) => response.envelope().map(|envelope| envelope.status),
                Err(failure) => failure.status(),
            };
            warn!(label = %spec.label(), status = ?status, "mutation token acquisition failed: no token header");
        }
        token
    }
}

/// Read the mutation token header off a probe outcome
///
/// The platform puts the token on its rejection, but a probe that
/// unexpectedly succeeds is inspected as well. Empty header values are
/// ignored.
#[must_use]
pub fn extract_token(outcome: &CallOutcome) -> Option<MutationToken> {
    let header = match outcome {
        Ok(response) => response.envelope().and_then(|envelope| envelope.header(CSRF_TOKEN_HEADER)),
        Err(failure) => failure.header(CSRF_TOKEN_HEADER),
    };

    header.filter(|value| !value.trim().is_empty()).map(MutationToken::new)
}
