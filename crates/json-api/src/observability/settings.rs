//! Request-path settings, fixed once at startup.

use std::sync::OnceLock;

use tracing::warn;

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    pub(super) slow_request_threshold_ms: u64,

    /// Honour incoming `traceparent` headers.
    pub(super) propagate_parent: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold_ms: 1_000,
            propagate_parent: false,
        }
    }
}

impl RequestSettings {
    fn new(otel_enabled: bool, parent_propagation: bool, slow_request_threshold_ms: u64) -> Self {
        Self {
            slow_request_threshold_ms,
            // Remote parents are pointless without an exporter.
            propagate_parent: otel_enabled && parent_propagation,
        }
    }
}

static REQUEST_SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

pub(super) fn apply_runtime_config(config: &ObservabilityConfig) {
    let settings = RequestSettings::new(
        config.otel_enabled,
        config.otel_parent_propagation_enabled,
        config.slow_request_threshold_ms,
    );

    if REQUEST_SETTINGS.set(settings).is_err() {
        warn!("request settings were already applied, keeping the first");
    }
}

pub(super) fn current() -> RequestSettings {
    REQUEST_SETTINGS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_propagation_needs_an_exporter() {
        assert!(!RequestSettings::new(false, true, 500).propagate_parent);
        assert!(!RequestSettings::new(true, false, 500).propagate_parent);
        assert!(RequestSettings::new(true, true, 500).propagate_parent);
    }

    #[test]
    fn threshold_is_kept() {
        assert_eq!(
            RequestSettings::new(false, false, 250).slow_request_threshold_ms,
            250
        );
    }
}
