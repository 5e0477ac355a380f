pub mod middleware;

pub use middleware::MetricsMiddleware;

use std::sync::OnceLock;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::config::AppMetadata;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const HTTP_DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0];

/// Handle to the process-wide Prometheus recorder
///
/// The recorder is installed once; later constructions share it, which
/// keeps tests that build several apps in one process working.
#[derive(Clone)]
pub struct AppMetrics {
    handle: PrometheusHandle,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::with_metadata(None)
    }

    pub fn with_metadata(metadata: Option<&AppMetadata>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| Self::install(metadata));

        Self {
            handle: handle.clone(),
        }
    }

    fn install(metadata: Option<&AppMetadata>) -> PrometheusHandle {
        let builder = match metadata {
            Some(app) => PrometheusBuilder::new()
                .add_global_label("service", app.name.clone())
                .add_global_label("version", app.version.clone())
                .add_global_label("environment", app.environment.clone()),
            None => PrometheusBuilder::new(),
        };

        let builder = match builder.set_buckets_for_metric(
            Matcher::Full("http_requests_duration_seconds".to_string()),
            HTTP_DURATION_BUCKETS,
        ) {
            Ok(builder) => builder,
            Err(e) => {
                ::tracing::warn!(error = %e, "Falling back to default histogram buckets");
                PrometheusBuilder::new()
            }
        };

        let recorder = builder.build_recorder();
        let handle = recorder.handle();

        if let Err(e) = metrics::set_global_recorder(recorder) {
            ::tracing::warn!(error = %e, "Metrics recorder already installed");
        }

        Self::describe_metrics();

        handle
    }

    fn describe_metrics() {
        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_requests_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_gauge!(
            "http_requests_in_flight",
            "Number of HTTP requests currently being processed"
        );

        describe_counter!(
            "auth_attempts_total",
            "Authentication attempts by method and outcome"
        );
        describe_counter!("users_created_total", "Users created through the admin endpoint");
        describe_counter!(
            "account_operations_total",
            "Deposits and withdrawals by outcome"
        );
        describe_counter!("transfers_total", "Transfers by outcome");
        describe_counter!(
            "transferred_amount_total",
            "Sum of successfully transferred amounts by currency"
        );
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        counter!(
            "http_requests_total",
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "http_requests_duration_seconds",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .record(duration_secs);
    }

    pub fn http_request_start(&self) {
        gauge!("http_requests_in_flight").increment(1.0);
    }

    pub fn http_request_end(&self) {
        gauge!("http_requests_in_flight").decrement(1.0);
    }

    /// Prometheus text exposition of everything recorded so far
    pub fn render(&self) -> String {
        self.handle.run_upkeep();
        self.handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Domain counters
// ============================================================================
//
// These go through the global recorder and are no-ops until `AppMetrics`
// has been constructed.

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failure" }
}

/// `method` is `basic`, `cache` or `admin_key`
pub fn record_auth_attempt(method: &'static str, success: bool) {
    counter!("auth_attempts_total", "method" => method, "outcome" => outcome(success)).increment(1);
}

pub fn record_user_created() {
    counter!("users_created_total").increment(1);
}

/// `operation` is `deposit` or `withdraw`
pub fn record_account_operation(operation: &'static str, success: bool) {
    counter!(
        "account_operations_total",
        "operation" => operation,
        "outcome" => outcome(success)
    )
    .increment(1);
}

pub fn record_transfer(success: bool) {
    counter!("transfers_total", "outcome" => outcome(success)).increment(1);
}

pub fn record_transferred_amount(currency: &'static str, amount: i64) {
    counter!("transferred_amount_total", "currency" => currency).increment(amount.unsigned_abs());
}
