//! Per-request span, request id and outcome logging.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use quire_app::domain::users::data::Actor;

use super::{metrics, settings};

/// Paths served without a request span.
const UNTRACED_PREFIXES: [&str; 4] = ["/metrics", "/healthcheck", "/docs", "/api-doc"];

fn is_traced(path: &str) -> bool {
    !UNTRACED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if !is_traced(req.uri().path()) {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        user = field::Empty,
        status = field::Empty,
        duration_ms = field::Empty
    );

    if settings::current().propagate_parent
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    // The session middleware stores the actor for authenticated routes.
    if let Ok(actor) = depot.obtain::<Actor>() {
        span.record("user", field::display(actor.user));
    }

    let status = request_ids::response_status_or_ok(res.status_code);
    let elapsed = started.elapsed();

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), elapsed.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());

    span.in_scope(|| log_outcome(status, elapsed));
}

fn log_outcome(status: StatusCode, elapsed: Duration) {
    let status = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::current().slow_request_threshold_ms);

    info!(status, duration_ms, "request.completed");

    if (500..600).contains(&status) {
        error!(status, "server error response");
    } else if (400..500).contains(&status) {
        warn!(status, "client error response");
    }

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request detected");
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("api/books/get-all-books").get(ok))
                .push(Router::with_path("healthcheck").get(ok)),
        )
    }

    #[test]
    fn probes_and_docs_are_not_traced() {
        assert!(!is_traced("/metrics"));
        assert!(!is_traced("/healthcheck"));
        assert!(!is_traced("/docs/index.html"));
        assert!(!is_traced("/api-doc/openapi.json"));
        assert!(is_traced("/api/cart/get-cart"));
    }

    #[tokio::test]
    async fn supplied_request_id_is_echoed() -> TestResult {
        let res = TestClient::get("http://example.com/api/books/get-all-books")
            .add_header(request_ids::REQUEST_ID_HEADER, "req-42", true)
            .send(&make_service())
            .await;

        assert_eq!(
            res.headers()
                .get(request_ids::REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-42")
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() -> TestResult {
        let mut res = TestClient::get("http://example.com/api/books/get-all-books")
            .send(&make_service())
            .await;

        assert!(res.headers().contains_key(request_ids::REQUEST_ID_HEADER));
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn untraced_paths_get_no_request_id() {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service())
            .await;

        assert!(!res.headers().contains_key(request_ids::REQUEST_ID_HEADER));
    }
}
