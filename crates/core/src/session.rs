//! Session facade
//!
//! A [`Session`] is what resource call sites hold: one credential, its
//! mutation token, an executor and a paginator. Every call made through it
//! carries the session cookie; mutations additionally carry the token.

use std::sync::Arc;

use rsblox_domain::{
    ApiResponse, CallFailure, CallOutcome, ClientConfig, Collected, Credential, HttpMethod,
    MutationToken, RawBody, RequestSpec,
};
use serde_json::Value;
use tracing::instrument;

use crate::auth::AuthContext;
use crate::pagination::Paginator;
use crate::transport::RequestExecutor;

/// Authenticated handle for one account
///
/// Shareable across tasks behind an `Arc`.
pub struct Session {
    auth: AuthContext,
    executor: Arc<dyn RequestExecutor>,
    paginator: Paginator,
}

impl Session {
    /// Session over `executor` using the auth and pagination sections of `config`.
    #[must_use]
    pub fn new(credential: Credential, executor: Arc<dyn RequestExecutor>, config: &ClientConfig) -> Self {
        Self {
            auth: AuthContext::from_config(credential, &config.auth),
            executor,
            paginator: Paginator::new(config.pagination),
        }
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        self.auth.credential()
    }

    /// Token cache backing this session.
    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Executor for calls that bypass the session (anonymous endpoints).
    #[must_use]
    pub fn executor(&self) -> &dyn RequestExecutor {
        self.executor.as_ref()
    }

    /// Paginator configured with this session's caps.
    #[must_use]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// See [`AuthContext::ensure_token`].
    pub async fn ensure_token(&self) -> bool {
        self.auth.ensure_token(self.executor.as_ref()).await
    }

    /// Cached mutation token, without probing.
    pub async fn token(&self) -> Option<MutationToken> {
        self.auth.token().await
    }

    /// See [`AuthContext::invalidate`].
    pub async fn invalidate_token(&self) {
        self.auth.invalidate().await;
    }

    /// Authenticated call resolving to the response body.
    pub async fn execute(&self, method: HttpMethod, url: &str, body: Option<Value>) -> CallOutcome {
        let spec = self.spec(method, url, body).await;
        self.executor.execute(&spec).await
    }

    /// Authenticated call resolving to the full response envelope.
    pub async fn execute_full(&self, method: HttpMethod, url: &str, body: Option<Value>) -> CallOutcome {
        let spec = self.spec(method, url, body).await.full_response();
        self.executor.execute(&spec).await
    }

    /// State-changing call
    ///
    /// Acquires the mutation token first. When that fails the mutation is
    /// not sent and a failure of kind `Token` comes back.
    #[instrument(skip(self, body), fields(method = %method))]
    pub async fn mutate(&self, method: HttpMethod, url: &str, body: Option<Value>) -> CallOutcome {
        if !self.ensure_token().await {
            return Err(CallFailure::token(format!("{method} {url}")));
        }
        self.execute(method, url, body).await
    }

    /// Authenticated pagination over a list endpoint.
    pub async fn collect(&self, method: HttpMethod, url: &str, body: Option<Value>) -> Collected {
        let spec = self.spec(method, url, body).await;
        self.paginator.collect(self.executor.as_ref(), &spec).await
    }

    async fn spec(&self, method: HttpMethod, url: &str, body: Option<Value>) -> RequestSpec<'_> {
        RequestSpec::new(method, url)
            .with_credential(self.auth.credential())
            .with_token(self.auth.token().await)
            .with_json(body)
    }
}

/// Body of a successful call, or `None` for failures and empty bodies.
#[must_use]
pub fn body_or_none(outcome: &CallOutcome) -> Option<&RawBody> {
    outcome.as_ref().ok().and_then(ApiResponse::body)
}
