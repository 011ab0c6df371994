//! Prometheus metrics for the dashboard API

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub database_connected: Gauge,
    pub view_cache_hits_total: IntCounter,
    pub view_cache_misses_total: IntCounter,
    pub pipeline_runs_total: IntCounter,
    pub pipeline_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let database_connected = Gauge::new(
            "database_connected",
            "1 when the analysis store is reachable, 0 otherwise",
        )?;
        let view_cache_hits_total =
            IntCounter::new("view_cache_hits_total", "Views served from the view cache")?;
        let view_cache_misses_total =
            IntCounter::new("view_cache_misses_total", "Views rebuilt from the store")?;
        let pipeline_runs_total =
            IntCounter::new("pipeline_runs_total", "Analysis pipeline invocations")?;
        let pipeline_failures_total = IntCounter::new(
            "pipeline_failures_total",
            "Analysis pipeline invocations that failed or timed out",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(database_connected.clone()))?;
        registry.register(Box::new(view_cache_hits_total.clone()))?;
        registry.register(Box::new(view_cache_misses_total.clone()))?;
        registry.register(Box::new(pipeline_runs_total.clone()))?;
        registry.register(Box::new(pipeline_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            database_connected,
            view_cache_hits_total,
            view_cache_misses_total,
            pipeline_runs_total,
            pipeline_failures_total,
        })
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
