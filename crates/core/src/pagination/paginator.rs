//! Paginator: follows `nextPageCursor` until the server runs dry

use rsblox_domain::constants::CURSOR_QUERY_PARAM;
use rsblox_domain::{CallFailure, Collected, Page, PaginationConfig, RequestSpec, StopReason};
use tracing::{debug, instrument, warn};

use crate::codec::decode_response;
use crate::failure::classify;
use crate::transport::RequestExecutor;

/// Drives page requests through a [`RequestExecutor`]
///
/// A failed page ends the run; items gathered so far are kept and the
/// failure is recorded in [`Collected::stop`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    limits: PaginationConfig,
}

impl Paginator {
    /// A cap of `Some(0)` is treated as no cap.
    #[must_use]
    pub fn new(limits: PaginationConfig) -> Self {
        Self { limits: limits.normalized() }
    }

    /// Caps in effect, after normalization.
    #[must_use]
    pub fn limits(&self) -> PaginationConfig {
        self.limits
    }

    /// Collect every item behind `spec`
    ///
    /// Each page is requested with the same method, credential, token and
    /// body as `spec`; only the URL changes.
    #[instrument(skip_all, fields(method = %spec.method, url = %spec.url))]
    pub async fn collect(&self, executor: &dyn RequestExecutor, spec: &RequestSpec<'_>) -> Collected {
        let joiner = if spec.url.contains('?') { '&' } else { '?' };
        let mut cursor = String::new();
        let mut items = Vec::new();
        let mut pages = 0usize;

        let stop = loop {
            if self.limits.max_pages.is_some_and(|max| pages >= max) {
                warn!(pages, items = items.len(), "page limit reached, collection truncated");
                break StopReason::PageLimit;
            }

            let page_spec = spec.with_url(format!(
                "{}{joiner}{CURSOR_QUERY_PARAM}={}",
                spec.url,
                urlencoding::encode(&cursor)
            ));
            pages += 1;

            let response = match executor.execute(&page_spec).await {
                Ok(response) => response,
                Err(failure) => break StopReason::Failed(failure.kind),
            };
            let page = match decode_response(&response) {
                Ok(value) => Page::from_value(value),
                Err(err) => {
                    let failure = CallFailure::decode(page_spec.label(), &err);
                    classify(&failure, false);
                    break StopReason::Failed(failure.kind);
                }
            };

            debug!(page = pages, size = page.data.len(), has_next = page.next_page_cursor.is_some(), "fetched page");

            if page.data.is_empty() {
                break StopReason::EmptyPage;
            }
            items.extend(page.data);

            if let Some(max) = self.limits.max_items {
                if items.len() >= max {
                    if items.len() > max || page.next_page_cursor.is_some() {
                        warn!(pages, max_items = max, "item limit reached, collection truncated");
                    }
                    items.truncate(max);
                    break StopReason::ItemLimit;
                }
            }

            match page.next_page_cursor {
                Some(next) => cursor = next,
                None => break StopReason::Exhausted,
            }
        };

        debug!(pages, items = items.len(), stop = ?stop, "pagination finished");
        Collected { items, pages, stop }
    }
}

#[cfg(test)]
mod tests {
    use rsblox_domain::{ApiResponse, CallOutcome, Credential, FailureKind, RawBody};
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::ScriptedExecutor;

    const FRIENDS: &str = "https://friends.example.com/v1/users/1/friends";

    fn page(ids: &[u64], next: Option<&str>) -> Value {
        json!({
            "previousPageCursor": null,
            "nextPageCursor": next,
            "data": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
        })
    }

    fn three_pages() -> ScriptedExecutor {
        ScriptedExecutor::new()
            .json_route(format!("{FRIENDS}?cursor="), page(&[1, 2], Some("c2")))
            .json_route(format!("{FRIENDS}?cursor=c2"), page(&[3, 4], Some("c3")))
            .json_route(format!("{FRIENDS}?cursor=c3"), page(&[5], None))
    }

    fn ids(collected: &Collected) -> Vec<u64> {
        collected.items.iter().filter_map(|item| item["id"].as_u64()).collect()
    }

    #[tokio::test]
    async fn chained_pages_concatenate_in_order() {
        let executor = three_pages();
        let collected = Paginator::default().collect(&executor, &RequestSpec::get(FRIENDS)).await;

        assert_eq!(ids(&collected), vec![1, 2, 3, 4, 5]);
        assert_eq!(collected.pages, 3);
        assert_eq!(collected.stop, StopReason::Exhausted);

        let urls: Vec<String> = executor.requests().into_iter().map(|request| request.url).collect();
        assert_eq!(
            urls,
            vec![format!("{FRIENDS}?cursor="), format!("{FRIENDS}?cursor=c2"), format!("{FRIENDS}?cursor=c3")]
        );
    }

    #[tokio::test]
    async fn failed_page_keeps_earlier_items() {
        let failure: CallOutcome = Err(CallFailure::transport("GET page 2", "connection reset"));
        let executor = ScriptedExecutor::new()
            .json_route(format!("{FRIENDS}?cursor="), page(&[1, 2], Some("c2")))
            .route(format!("{FRIENDS}?cursor=c2"), failure);

        let collected = Paginator::default().collect(&executor, &RequestSpec::get(FRIENDS)).await;

        assert_eq!(ids(&collected), vec![1, 2]);
        assert_eq!(collected.stop, StopReason::Failed(FailureKind::Transport));
        assert!(!collected.stop.is_complete());
    }

    #[tokio::test]
    async fn repeated_collection_is_identical() {
        let executor = three_pages();
        let paginator = Paginator::default();
        let spec = RequestSpec::get(FRIENDS);

        let first = paginator.collect(&executor, &spec).await;
        let second = paginator.collect(&executor, &spec).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn existing_query_string_uses_ampersand() {
        let url = "https://groups.example.com/v1/groups/7/users?limit=100&sortOrder=Asc";
        let executor = ScriptedExecutor::new().json_route(format!("{url}&cursor="), page(&[9], None));

        let collected = Paginator::default().collect(&executor, &RequestSpec::get(url)).await;
        assert_eq!(ids(&collected), vec![9]);
    }

    #[tokio::test]
    async fn cursor_is_percent_encoded() {
        let executor = ScriptedExecutor::new()
            .json_route(format!("{FRIENDS}?cursor="), page(&[1], Some("a+b/c=")))
            .json_route(format!("{FRIENDS}?cursor=a%2Bb%2Fc%3D"), page(&[2], None));

        let collected = Paginator::default().collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert_eq!(ids(&collected), vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_page_stops_collection() {
        let executor = ScriptedExecutor::new()
            .json_route(format!("{FRIENDS}?cursor="), page(&[1], Some("c2")))
            .json_route(format!("{FRIENDS}?cursor=c2"), page(&[], Some("c3")));

        let collected = Paginator::default().collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert_eq!(ids(&collected), vec![1]);
        assert_eq!(collected.stop, StopReason::EmptyPage);
        assert_eq!(executor.calls_to(&format!("{FRIENDS}?cursor=c3")), 0);
    }

    #[tokio::test]
    async fn undecodable_first_page_yields_nothing() {
        let garbage: CallOutcome = Ok(ApiResponse::Body(Some(RawBody::Text("<html>".to_string()))));
        let executor = ScriptedExecutor::new().route(format!("{FRIENDS}?cursor="), garbage);

        let collected = Paginator::default().collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert!(collected.is_empty());
        assert_eq!(collected.stop, StopReason::Failed(FailureKind::Decode));
    }

    #[tokio::test]
    async fn page_limit_bounds_an_endless_server() {
        let executor = ScriptedExecutor::new()
            .json_route(format!("{FRIENDS}?cursor="), page(&[1], Some("again")))
            .json_route(format!("{FRIENDS}?cursor=again"), page(&[2], Some("again")));
        let paginator = Paginator::new(PaginationConfig { max_pages: Some(4), max_items: None });

        let collected = paginator.collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert_eq!(collected.pages, 4);
        assert_eq!(ids(&collected), vec![1, 2, 2, 2]);
        assert_eq!(collected.stop, StopReason::PageLimit);
    }

    #[tokio::test]
    async fn item_limit_truncates_the_last_page() {
        let executor = three_pages();
        let paginator = Paginator::new(PaginationConfig { max_pages: None, max_items: Some(3) });

        let collected = paginator.collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert_eq!(ids(&collected), vec![1, 2, 3]);
        assert_eq!(collected.pages, 2);
        assert_eq!(collected.stop, StopReason::ItemLimit);
    }

    #[tokio::test]
    async fn every_page_carries_the_request_context() {
        let credential = Credential::new("cookie");
        let executor = three_pages();
        let spec = RequestSpec::get(FRIENDS).with_credential(&credential);

        Paginator::default().collect(&executor, &spec).await;

        let requests = executor.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|request| request.has_credential && !request.full_response));
    }

    #[tokio::test]
    async fn zero_caps_do_not_limit_collection() {
        let executor = three_pages();
        let paginator = Paginator::new(PaginationConfig { max_pages: Some(0), max_items: Some(0) });
        assert_eq!(paginator.limits(), PaginationConfig::unbounded());

        let collected = paginator.collect(&executor, &RequestSpec::get(FRIENDS)).await;
        assert_eq!(collected.stop, StopReason::Exhausted);
        assert_eq!(collected.into_items().len(), 5);
    }
}
