//! Session factory
//!
//! Wires the reqwest-backed [`HttpClient`] into a core [`Session`].

use std::sync::Arc;

use rsblox_core::Session;
use rsblox_domain::{BloxError, ClientConfig, Credential, Result};
use tracing::info;

use crate::http::HttpClient;

/// Build the shared HTTP client described by `config`
///
/// One client can back any number of sessions and anonymous calls.
///
/// # Errors
/// Returns `BloxError::Config` if the TLS/HTTP stack rejects the settings.
pub fn build_client(config: &ClientConfig) -> Result<Arc<HttpClient>> {
    HttpClient::from_config(&config.http).map(Arc::new)
}

/// Build a session for `credential` on a fresh client.
///
/// # Errors
/// Returns `BloxError::Auth` for an empty credential, or whatever
/// [`build_client`] returns.
pub fn build_session(config: &ClientConfig, credential: Credential) -> Result<Session> {
    let client = build_client(config)?;
    session_with_client(config, credential, client)
}

/// Build a session sharing an existing client.
///
/// # Errors
/// Returns `BloxError::Auth` for an empty credential.
pub fn session_with_client(
    config: &ClientConfig,
    credential: Credential,
    client: Arc<HttpClient>,
) -> Result<Session> {
    if credential.is_empty() {
        return Err(BloxError::Auth("session credential is empty".into()));
    }

    info!(probe_url = %config.auth.token_probe_url, "session created");
    Ok(Session::new(credential, client, config))
}
