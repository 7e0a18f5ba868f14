//! Yearbook Observability
//!
//! Structured logging, HTTP request logging and Prometheus metrics.
//!
//! Everything here sits behind the `observability` feature (on by default).
//! At runtime the `OBSERVABILITY_ENABLED` environment variable can switch the
//! metrics and request logging off without a rebuild.
//!
//! ```no_run
//! use yearbook_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let _handle = init_metrics();
//! }
//! ```

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_dashboard_report, track_records_synced,
    track_year_transition,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {}

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn metrics_app(_handle: ()) -> Router {
        Router::new()
    }

    pub fn track_year_transition(_action: &str) {}
    pub fn track_dashboard_report(_report: &str) {}
    pub fn track_records_synced(_records: usize) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
