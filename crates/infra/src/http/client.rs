use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, Response};
use rsblox_core::{classify, RequestExecutor};
use rsblox_domain::constants::{CSRF_TOKEN_HEADER, DEFAULT_TIMEOUT_SECS};
use rsblox_domain::{
    ApiResponse, BloxError, CallFailure, CallOutcome, HttpConfig, HttpMethod, RawBody,
    RequestSpec, ResponseEnvelope,
};
use tracing::{debug, instrument};

use crate::errors::InfraError;

/// reqwest-backed [`RequestExecutor`]
///
/// Every call is attempted exactly once. Failures are classified here and
/// handed back as values.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `BloxError::Config` if the TLS stack cannot be initialized.
    pub fn new() -> Result<Self, BloxError> {
        Self::builder().build()
    }

    /// Client honoring the timeout, user agent and TLS settings of `config`.
    ///
    /// # Errors
    /// Returns `BloxError::Config` when reqwest rejects the settings.
    pub fn from_config(config: &HttpConfig) -> Result<Self, BloxError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .accept_invalid_certs(config.accept_invalid_certs)
            .build()
    }

    async fn read_envelope(response: Response, prefer_json: bool) -> Result<ResponseEnvelope, reqwest::Error> {
        let status = response.status();
        let headers = collect_headers(response.headers());
        let text = response.text().await?;

        Ok(ResponseEnvelope {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: RawBody::from_wire(text, prefer_json),
        })
    }
}

#[async_trait]
impl RequestExecutor for HttpClient {
    #[instrument(skip_all, fields(method = %spec.method, url = %spec.url))]
    async fn execute(&self, spec: &RequestSpec<'_>) -> CallOutcome {
        let label = spec.label();
        let mut request = self.client.request(to_reqwest_method(spec.method), spec.url.as_str());

        if let Some(credential) = spec.credential {
            request = request.header(reqwest::header::COOKIE, credential.cookie_header());
        }
        if let Some(token) = spec.token.as_ref() {
            request = request.header(CSRF_TOKEN_HEADER, token.as_str());
        }
        if let Some(body) = spec.body.as_ref() {
            request = request.json(body);
        }

        debug!("sending HTTP request");

        let envelope = match request.send().await {
            Ok(response) => Self::read_envelope(response, spec.body.is_some()).await,
            Err(err) => Err(err),
        };
        let envelope = match envelope {
            Ok(envelope) => envelope,
            Err(err) => {
                let failure = CallFailure::transport(label, err.to_string());
                classify(&failure, false);
                return Err(failure);
            }
        };

        debug!(status = envelope.status, "received HTTP response");

        if !envelope.is_success() {
            let failure = CallFailure::http(label, envelope);
            classify(&failure, spec.expect_rejection);
            return Err(failure);
        }

        if spec.full_response {
            Ok(ApiResponse::Envelope(envelope))
        } else {
            Ok(ApiResponse::Body(envelope.body))
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout covering connect, send and body read.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent on every request; reqwest's default when unset.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Skip TLS certificate validation (self-signed or intercepting proxies).
    #[must_use]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `BloxError::Config` when reqwest rejects the settings (for
    /// example a user agent that is not a valid header value).
    pub fn build(self) -> Result<HttpClient, BloxError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            BloxError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use rsblox_domain::{Credential, FailureKind, MutationToken};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).build().expect("http client")
    }

    #[tokio::test]
    async fn attaches_cookie_token_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/groups/7/status"))
            .and(header("cookie", ".ROBLOSECURITY=secret-cookie"))
            .and(header("x-csrf-token", "tok-1"))
            .and(body_json(json!({"message": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"body": "hello"})))
            .expect(1)
            .mount(&server)
            .await;

        let credential = Credential::new("secret-cookie");
        let url = format!("{}/v1/groups/7/status", server.uri());
        let spec = RequestSpec::patch(url)
            .with_credential(&credential)
            .with_token(Some(MutationToken::new("tok-1")))
            .with_json(Some(json!({"message": "hello"})));

        let response = client().execute(&spec).await.expect("success");
        assert_eq!(response.body(), Some(&RawBody::Json(json!({"body": "hello"}))));
    }

    #[tokio::test]
    async fn anonymous_get_sends_no_session_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let response = client().execute(&RequestSpec::get(server.uri())).await.expect("success");
        assert_eq!(response.body(), Some(&RawBody::Text(r#"{"id":1}"#.to_string())));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("cookie").is_none());
        assert!(requests[0].headers.get("x-csrf-token").is_none());
    }

    #[tokio::test]
    async fn full_response_exposes_status_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-Trace", "abc").set_body_string("ok"))
            .mount(&server)
            .await;

        let spec = RequestSpec::get(server.uri()).full_response();
        let response = client().execute(&spec).await.expect("success");

        let envelope = response.envelope().expect("envelope");
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.status_text, "OK");
        assert_eq!(envelope.header("x-trace"), Some("abc"));
        assert_eq!(envelope.body, Some(RawBody::Text("ok".to_string())));
    }

    #[tokio::test]
    async fn rejected_probe_carries_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/logout"))
            .and(header_exists("cookie"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-csrf-token", "fresh-token")
                    .set_body_json(json!({"errors": [{"code": 0, "message": "Token Validation Failed"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let credential = Credential::new("cookie");
        let spec = RequestSpec::post(format!("{}/v2/logout", server.uri()))
            .with_credential(&credential)
            .full_response()
            .expect_rejection();

        let failure = client().execute(&spec).await.expect_err("403 is a failure");
        assert_eq!(failure.kind, FailureKind::Http);
        assert_eq!(failure.status(), Some(403));
        assert_eq!(failure.header("x-csrf-token"), Some("fresh-token"));
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let failure = client().execute(&RequestSpec::get(server.uri())).await.expect_err("failure");
        assert_eq!(failure.kind, FailureKind::Http);
        assert_eq!(failure.status(), Some(500));
    }

    #[tokio::test]
    async fn empty_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = client().execute(&RequestSpec::delete(server.uri())).await.expect("success");
        assert_eq!(response.body(), None);
    }

    #[tokio::test]
    async fn network_failure_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let failure = client().execute(&RequestSpec::get(url.clone())).await.expect_err("failure");
        assert_eq!(failure.kind, FailureKind::Transport);
        assert_eq!(failure.label, format!("GET {url}"));
        assert!(failure.envelope.is_none());
    }

    #[test]
    fn invalid_user_agent_is_a_config_error() {
        let result = HttpClient::builder().user_agent("bad\nagent").build();
        assert!(matches!(result, Err(BloxError::Config(_))));

        let config = HttpConfig { user_agent: "bad\nagent".to_string(), ..HttpConfig::default() };
        assert!(matches!(HttpClient::from_config(&config), Err(BloxError::Config(_))));
    }

    #[test]
    fn builds_from_config() {
        let config = HttpConfig { accept_invalid_certs: true, ..HttpConfig::default() };
        assert!(HttpClient::from_config(&config).is_ok());
    }
}
