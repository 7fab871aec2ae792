//! Failure classification
//!
//! Turns a failed call into one operator-facing diagnostic line. This is a
//! terminal sink: it logs and returns nothing, and callers keep the
//! [`CallFailure`] value they already hold.

use rsblox_domain::{CallFailure, RawBody};
use serde_json::Value;
use tracing::{debug, error};

/// Log a failed call
///
/// `expected` marks failures that are the normal outcome of the call (the
/// token probe); those are logged at debug level.
pub fn classify(failure: &CallFailure, expected: bool) {
    let message = describe(failure);
    let kind = failure.kind.as_str();
    let status = failure.status();

    if expected {
        debug!(label = %failure.label, kind, status = ?status, "{message}");
    } else {
        error!(label = %failure.label, kind, status = ?status, "{message}");
    }
}

/// Compose the diagnostic for a failure
///
/// With a response: status line, context label, and the body (serialized
/// JSON when it decodes, raw text otherwise) when there is one. Without a
/// response: context label and the transport's description.
#[must_use]
pub fn describe(failure: &CallFailure) -> String {
    let Some(envelope) = failure.envelope.as_ref() else {
        return format!("{}\n{}", failure.label, failure.message);
    };

    let mut message = format!(
        "{status} {text}\n{label} error: {text} (Code: {status})",
        status = envelope.status,
        text = envelope.status_text,
        label = failure.label,
    );
    if let Some(body) = envelope.body.as_ref() {
        message.push_str("\nResponse: ");
        message.push_str(&render_body(body));
    }
    message
}

fn render_body(body: &RawBody) -> String {
    match body {
        RawBody::Json(value) => value.to_string(),
        RawBody::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => value.to_string(),
            Err(_) => text.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use rsblox_domain::ResponseEnvelope;
    use serde_json::json;

    use super::*;
    use crate::testing::capture_logs;

    fn forbidden(body: Option<RawBody>) -> CallFailure {
        let envelope = ResponseEnvelope::new(403, "Forbidden").with_body(body);
        CallFailure::http("PATCH https://groups.example.com/v1/groups/7/status", envelope)
    }

    #[test]
    fn describe_includes_status_and_structured_body() {
        let body = RawBody::Json(json!({"errors": [{"code": 0, "message": "Token Validation Failed"}]}));
        let message = describe(&forbidden(Some(body)));

        assert!(message.starts_with("403 Forbidden\n"));
        assert!(message.contains(
            "PATCH https://groups.example.com/v1/groups/7/status error: Forbidden (Code: 403)"
        ));
        assert!(message
            .contains(r#"Response: {"errors":[{"code":0,"message":"Token Validation Failed"}]}"#));
    }

    #[test]
    fn describe_reserializes_json_text_bodies() {
        let body = RawBody::Text("{ \"errors\" : [] }".to_string());
        let message = describe(&forbidden(Some(body)));
        assert!(message.ends_with(r#"Response: {"errors":[]}"#));
    }

    #[test]
    fn describe_keeps_raw_text_when_body_is_not_json() {
        let body = RawBody::Text("Service Unavailable".to_string());
        let message = describe(&forbidden(Some(body)));
        assert!(message.ends_with("Response: Service Unavailable"));
    }

    #[test]
    fn describe_omits_body_segment_without_body() {
        let message = describe(&forbidden(None));
        assert!(!message.contains("Response:"));
        assert!(message.contains("(Code: 403)"));
    }

    #[test]
    fn describe_transport_failure_uses_label_and_description() {
        let failure =
            CallFailure::transport("GET https://chat.example.com/v2/chat-settings", "connection reset");
        assert_eq!(
            describe(&failure),
            "GET https://chat.example.com/v2/chat-settings\nconnection reset"
        );
    }

    #[test]
    fn classify_logs_status_and_body() {
        let failure = forbidden(Some(RawBody::Json(json!({"reason": "denied"}))));
        let (_guard, logs) = capture_logs();
        classify(&failure, false);
        let output = logs.contents();

        assert_eq!(logs.count("ERROR"), 1);
        assert!(output.contains("403"));
        assert!(output.contains(r#"{"reason":"denied"}"#));
    }

    #[test]
    fn classify_expected_failure_logs_at_debug() {
        let failure = forbidden(None);
        let (_guard, logs) = capture_logs();
        classify(&failure, true);

        assert!(logs.contents().contains("DEBUG"));
        assert_eq!(logs.count("ERROR"), 0);
    }
}
