use std::net::SocketAddr;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bkp_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use tracing::info;

pub fn router(metrics: PrometheusMetrics) -> Router {
    Router::new()
        .route("/metrics", get(serve_metrics))
        .with_state(metrics)
}

pub async fn serve(port: u16, metrics: PrometheusMetrics) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "serving metrics");

    axum::serve(listener, router(metrics)).await?;
    Ok(())
}

async fn serve_metrics(State(metrics): State<PrometheusMetrics>) -> Response {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();

    match encoder.encode(&metrics.gather(), &mut buf) {
        Ok(()) => ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buf).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
