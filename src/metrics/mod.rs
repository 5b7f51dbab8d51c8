//! # Metrics
//!
//! Prometheus export of pipeline and extraction metrics.
//!
//! **Counters:**
//! - `plancraft_sections_total{section, outcome}` - Sections by generated/fallback
//! - `plancraft_completion_attempts_total{tier}` - Completion calls by quality tier
//! - `plancraft_sessions_total{outcome}` - Sessions by completed/failed/cancelled
//! - `plancraft_extractions_total{kind, source}` - Extractions by matched/synthesized
//!
//! **Histograms:**
//! - `plancraft_section_duration_seconds{section}` - Wall time per section,
//!   including retries

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Instant;

/// Holds the Prometheus handle and process start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Install the global recorder, or fall back to a detached handle when
    /// one is already installed (tests, repeated router construction).
    pub fn install(start_time: Instant) -> Self {
        let handle = setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        });
        Self::new(start_time, handle)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the Prometheus exporter with buckets sized for completion
/// latency (seconds).
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[
        0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("plancraft_section_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(
        "plancraft_sections_total",
        "Plan sections produced, by section and outcome"
    );
    metrics::describe_counter!(
        "plancraft_completion_attempts_total",
        "Completion service calls, by quality tier"
    );
    metrics::describe_counter!(
        "plancraft_sessions_total",
        "Generation sessions, by outcome"
    );
    metrics::describe_counter!(
        "plancraft_extractions_total",
        "Entity extractions, by kind and source"
    );
    metrics::describe_histogram!(
        "plancraft_section_duration_seconds",
        metrics::Unit::Seconds,
        "Time to produce one section, including retries"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_uptime_starts_near_zero() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_detached_handle_renders_empty() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        assert!(collector.render_metrics().is_empty());
    }
}
