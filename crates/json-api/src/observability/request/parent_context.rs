//! W3C trace context extraction from incoming headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Read-only view of request headers for the text map propagator.
#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// The remote parent carried by `traceparent`, if it is valid.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    if !headers.contains_key("traceparent") {
        return None;
    }

    let context = global::get_text_map_propagator(|propagator| {
        // Start from an empty context, not the current span.
        propagator.extract_with_context(&Context::new(), &Headers(headers))
    });

    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}
