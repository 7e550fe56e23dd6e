use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    backend_requests_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Register collectors. Later calls are no-ops; recording before this runs
/// is silently dropped.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    let registry = Registry::new();

    let http_requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )?;

    let http_request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ),
        &["method", "path", "status"],
    )?;

    let backend_requests_total = IntCounterVec::new(
        Opts::new(
            "backend_requests_total",
            "Calls to the document backend by operation and outcome",
        ),
        &["operation", "outcome"],
    )?;

    registry.register(Box::new(http_requests_total.clone()))?;
    registry.register(Box::new(http_request_duration_seconds.clone()))?;
    registry.register(Box::new(backend_requests_total.clone()))?;

    // Lost races keep the first registry; both are equivalent.
    let _ = METRICS.set(Metrics {
        registry,
        http_requests_total,
        http_request_duration_seconds,
        backend_requests_total,
    });

    Ok(())
}

pub fn record_http_request(method: &str, path: &str, status: &str, seconds: f64) {
    let labels = [method, path, status];
    if let Some(metrics) = METRICS.get() {
        metrics.http_requests_total.with_label_values(&labels).inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&labels)
            .observe(seconds);
    }
}

pub fn record_backend_call(operation: &str, outcome: &str) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .backend_requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }
}

/// Prometheus text exposition of everything registered.
pub fn get_metrics() -> Result<String, prometheus::Error> {
    let Some(metrics) = METRICS.get() else {
        return Ok(String::new());
    };

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
