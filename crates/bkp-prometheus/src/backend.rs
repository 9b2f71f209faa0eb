use async_trait::async_trait;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, proto::MetricFamily};
use thiserror::Error;

use bkp_core::{Observation, OutcomeObserver};

const NAMESPACE: &str = "bkp";

/// Kubernetes API round trips land between a few milliseconds and the request timeout.
const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to register metric: {0}")]
    Register(#[from] prometheus::Error),
}

/// Request metrics kept in a private [`Registry`].
///
/// Cloning is cheap and every clone records into the same collectors.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: HistogramVec,
}

impl PrometheusMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "Finished requests by operation and outcome")
                .namespace(NAMESPACE),
            &["operation", "status"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "Request handling time")
                .namespace(NAMESPACE)
                .buckets(DURATION_BUCKETS.to_vec()),
            &["operation"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn record(&self, observation: &Observation) {
        let op = observation.operation.as_str();
        self.requests
            .with_label_values(&[op, observation.status.label()])
            .inc();
        self.duration
            .with_label_values(&[op])
            .observe(observation.elapsed.as_secs_f64());
    }
}

#[async_trait]
impl OutcomeObserver for PrometheusMetrics {
    async fn on_outcome(&self, observation: &Observation) {
        self.record(observation);
    }

    fn name(&self) -> &'static str {
        "prometheus"
    }
}
