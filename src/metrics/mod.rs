use anyhow::Result;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    // Upstream calls are capped at two seconds, so the buckets stop there.
    const UPSTREAM_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 1.5, 2.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("upstream_request_duration_seconds".to_string()),
            UPSTREAM_SECONDS,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Counts one upstream call. `outcome` is `ok` or the failure cause.
pub fn record_upstream_request(method: &str, outcome: &'static str) {
    metrics::increment_counter!(
        "upstream_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    );
}

pub fn record_upstream_latency(method: &str, duration: Duration) {
    metrics::histogram!(
        "upstream_request_duration_seconds",
        duration.as_secs_f64(),
        "method" => method.to_string()
    );
}
