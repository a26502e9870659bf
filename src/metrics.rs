//! Prometheus metrics for request and store latency.
//!
//! The recorder is installed by the binary; without one every call here is a no-op.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Store statement latency metric name.
pub const METRIC_STORE_STATEMENT_LATENCY: &str = "store_statement_latency_ms";
/// Store failures counter metric name.
pub const METRIC_STORE_FAILURES: &str = "store_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_STORE_STATEMENT_LATENCY,
        "Database statement latency in milliseconds"
    );

    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_STORE_FAILURES,
        "Total number of store statements that failed"
    );

    debug!("Metrics initialized");
}

/// Record a served HTTP request.
pub fn record_http_request(start: Instant, method: &str, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = status.to_string();
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.clone()
    )
    .record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Increment store failures counter.
pub fn inc_store_failures() {
    counter!(METRIC_STORE_FAILURES).increment(1);
}

/// RAII guard for timing a store statement.
/// Automatically records latency when dropped.
pub struct StatementTimer {
    start: Instant,
    statement: &'static str,
}

impl StatementTimer {
    /// Start timing the named statement.
    pub fn new(statement: &'static str) -> Self {
        Self {
            start: Instant::now(),
            statement,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for StatementTimer {
    fn drop(&mut self) {
        histogram!(METRIC_STORE_STATEMENT_LATENCY, "statement" => self.statement)
            .record(self.elapsed_ms());
    }
}
