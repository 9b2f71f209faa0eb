//! Prometheus metrics for the backup scheduler.
//!
//! [`PrometheusMetrics`] is an [`bkp_core::OutcomeObserver`]: register it with the API adapter
//! and every finished request is counted and timed.
//!
//! ## Metrics
//! - `bkp_requests_total{operation, status}` - Counter
//! - `bkp_request_duration_seconds{operation}` - Histogram
//!
//! `status` is one of `created`, `exists`, `updated`, `failed`.
//!
//! ## HTTP Server
//! This crate does NOT serve `/metrics`. Encode [`PrometheusMetrics::gather`] with
//! [`TextEncoder`] from the application's HTTP stack.

mod backend;
pub use backend::{MetricsError, PrometheusMetrics};

pub use prometheus::{Encoder, Registry, TextEncoder};
