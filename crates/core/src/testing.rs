//! Scripted request executor for tests
//!
//! Routes are keyed by exact URL. Each route holds a queue of outcomes; the
//! last queued outcome is sticky and answers every further call. Calls to
//! unknown URLs resolve to a transport failure.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rsblox_domain::{
    ApiResponse, CallFailure, CallOutcome, FailureKind, HttpMethod, RawBody, RequestSpec,
    ResponseEnvelope,
};
use serde_json::Value;

use crate::failure::classify;
use crate::transport::RequestExecutor;

/// What the executor saw for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub has_credential: bool,
    pub token: Option<String>,
    pub body: Option<Value>,
    pub full_response: bool,
}

/// [`RequestExecutor`] answering from scripted per-URL queues.
#[derive(Default)]
pub struct ScriptedExecutor {
    routes: Mutex<HashMap<String, VecDeque<CallOutcome>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    latency: Option<Duration>,
}

impl ScriptedExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `outcome` for `url`.
    #[must_use]
    pub fn route(self, url: impl Into<String>, outcome: CallOutcome) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .entry(url.into())
            .or_default()
            .push_back(outcome);
        self
    }

    /// Queue a successful JSON body for `url`
    ///
    /// Full-response calls receive it wrapped in a `200 OK` envelope.
    #[must_use]
    pub fn json_route(self, url: impl Into<String>, body: Value) -> Self {
        self.route(url, Ok(ApiResponse::Body(Some(RawBody::Json(body)))))
    }

    /// Delay every call, so concurrent callers interleave.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every call seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap_or_else(|poison| poison.into_inner()).clone()
    }

    #[must_use]
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    fn next_outcome(&self, url: &str) -> Option<CallOutcome> {
        let mut routes = self.routes.lock().unwrap_or_else(|poison| poison.into_inner());
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, spec: &RequestSpec<'_>) -> CallOutcome {
        self.requests.lock().unwrap_or_else(|poison| poison.into_inner()).push(RecordedRequest {
            method: spec.method,
            url: spec.url.clone(),
            has_credential: spec.credential.is_some(),
            token: spec.token.as_ref().map(|token| token.as_str().to_string()),
            body: spec.body.clone(),
            full_response: spec.full_response,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let outcome = match self.next_outcome(&spec.url) {
            Some(outcome) => outcome,
            None => Err(CallFailure::transport(spec.label(), "no scripted response")),
        };

        match outcome {
            Ok(ApiResponse::Body(body)) if spec.full_response => {
                Ok(ApiResponse::Envelope(ResponseEnvelope::new(200, "OK").with_body(body)))
            }
            Ok(ApiResponse::Envelope(envelope)) if !spec.full_response => {
                Ok(ApiResponse::Body(envelope.body))
            }
            Ok(response) => Ok(response),
            Err(failure) => {
                // Matches the HTTP executor: only a rejection can be expected.
                classify(&failure, spec.expect_rejection && failure.kind == FailureKind::Http);
                Err(failure)
            }
        }
    }
}

/// In-memory sink for log output captured during a test.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap_or_else(|poison| poison.into_inner()).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|poison| poison.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Number of captured events at `level` (e.g. `"ERROR"`).
    pub(crate) fn count(&self, level: &str) -> usize {
        let marker = format!(" {level} ");
        self.contents().lines().filter(|line| line.contains(&marker)).count()
    }
}

/// Route this thread's log output into a buffer until the guard drops.
#[cfg(test)]
pub(crate) fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
