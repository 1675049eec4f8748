//! Logging, tracing and metrics.

use thiserror::Error;

mod init;
mod logging;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{
    metrics_handler, record_checkout_rejected, record_order_created, record_session_issued,
};
pub(crate) use request::request_logging;

/// Errors raised while starting observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP span exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("a global tracing subscriber is already installed: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
