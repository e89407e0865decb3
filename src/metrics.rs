//! HTTP request metrics exposed on `/metrics`

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Request duration buckets in seconds.
const DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 1.5];

const LABELS: &[&str] = &["method", "path", "status"];

/// Request counter and duration histogram, kept in a registry owned by the
/// application so that several routers can live in one process.
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests by method, route and status"),
            LABELS,
        )?;
        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration by method, route and status",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            LABELS,
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
        })
    }

    pub fn record_request(&self, method: &str, path: &str, status: u16, duration: Duration) {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];

        self.requests_total.with_label_values(&labels).inc();
        self.request_duration
            .with_label_values(&labels)
            .observe(duration.as_secs_f64());
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
