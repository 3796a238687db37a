//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op, so handlers never check whether metrics
//! are enabled.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let status = status.to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware that records every request against its matched route.
///
/// Installed with `route_layer`, so the matched path is always known; the
/// fallback label only guards against a misplaced layer.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    record_request(&method, &path, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use super::*;
    use crate::http::{build_router, AppState};

    async fn send(method: &str, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        build_router(AppState::default())
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    fn series<'a>(rendered: &'a str, name: &str, labels: &[&str]) -> Vec<&'a str> {
        rendered
            .lines()
            .filter(|line| line.starts_with(&format!("{}{{", name)))
            .filter(|line| labels.iter().all(|label| line.contains(label)))
            .collect()
    }

    #[test]
    fn test_requests_recorded_against_matched_route() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                assert_eq!(send("GET", "/healthz").await, StatusCode::OK);
                assert_eq!(send("GET", "/healthz").await, StatusCode::OK);
                assert_eq!(send("GET", "/").await, StatusCode::OK);
                assert_eq!(send("POST", "/healthz").await, StatusCode::METHOD_NOT_ALLOWED);
                assert_eq!(send("GET", "/missing").await, StatusCode::NOT_FOUND);
            });
        });

        let rendered = handle.render();

        let healthz = series(
            &rendered,
            "http_requests_total",
            &[r#"method="GET""#, r#"path="/healthz""#, r#"status="200""#],
        );
        assert_eq!(healthz.len(), 1, "{}", rendered);
        assert!(healthz[0].ends_with(" 2"), "{}", rendered);

        let root = series(
            &rendered,
            "http_requests_total",
            &[r#"method="GET""#, r#"path="/""#, r#"status="200""#],
        );
        assert_eq!(root.len(), 1, "{}", rendered);
        assert!(root[0].ends_with(" 1"), "{}", rendered);

        // Fallback responses are outside the route layer.
        assert!(!rendered.contains("/missing"), "{}", rendered);
        assert!(!rendered.contains("unmatched"), "{}", rendered);

        let latency = series(
            &rendered,
            "http_request_duration_seconds_count",
            &[r#"path="/healthz""#, r#"status="200""#],
        );
        assert_eq!(latency.len(), 1, "{}", rendered);
        assert!(latency[0].ends_with(" 2"), "{}", rendered);
    }
}
