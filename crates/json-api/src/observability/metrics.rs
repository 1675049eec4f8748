//! Prometheus metrics: HTTP traffic plus checkout and session counters.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct ApiMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    orders_created_total: IntCounter,
    order_amount_total: IntCounter,
    checkout_rejections_total: IntCounterVec,
    sessions_issued_total: IntCounter,
}

static API_METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static ApiMetrics> {
    API_METRICS
        .get_or_init(|| match ApiMetrics::build() {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build metrics registry: {source}");

                None
            }
        })
        .as_ref()
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

impl ApiMetrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "quire_json_http_requests_total",
                    "HTTP requests by method, route, status class and status code.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "quire_json_http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::new(
                "quire_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            )?,
        )?;

        let orders_created_total = register(
            &registry,
            IntCounter::new("quire_json_orders_created_total", "Orders placed.")?,
        )?;

        let order_amount_total = register(
            &registry,
            IntCounter::new(
                "quire_json_order_amount_minor_units_total",
                "Sum of placed order totals, in minor currency units.",
            )?,
        )?;

        let checkout_rejections_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "quire_json_checkout_rejections_total",
                    "Checkouts refused before an order was created, by reason.",
                ),
                &["reason"],
            )?,
        )?;

        let sessions_issued_total = register(
            &registry,
            IntCounter::new("quire_json_sessions_issued_total", "Successful logins.")?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            orders_created_total,
            order_amount_total,
            checkout_rejections_total,
            sessions_issued_total,
        })
    }
}

/// Keeps the in-flight gauge raised while alive.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a placed order and its total.
pub(crate) fn record_order_created(total_amount: u64) {
    if let Some(metrics) = metrics() {
        metrics.orders_created_total.inc();
        metrics.order_amount_total.inc_by(total_amount);
    }
}

/// Count a checkout refused for `reason`.
pub(crate) fn record_checkout_rejected(reason: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .checkout_rejections_total
            .with_label_values(&[reason])
            .inc();
    }
}

/// Count a session issued at login.
pub(crate) fn record_session_issued() {
    if let Some(metrics) = metrics() {
        metrics.sessions_issued_total.inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return;
    };

    let encoder = TextEncoder::new();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");

        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => error!("invalid metrics content type: {source}"),
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
