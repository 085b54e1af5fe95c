use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref SAMPLES_PUBLISHED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "logger_samples_published_total",
        "Local sensor samples published to cloud feeds"
    ))
    .unwrap();
    pub static ref SAMPLE_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "logger_sample_failures_total",
        "Failed sensor reads and local sample publishes"
    ))
    .unwrap();
    pub static ref WEATHER_POLLS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "logger_weather_polls_total",
        "Completed outdoor weather poll cycles"
    ))
    .unwrap();
    pub static ref WEATHER_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "logger_weather_failures_total",
        "Outdoor weather poll cycles aborted by an error"
    ))
    .unwrap();
    pub static ref PUBLISH_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "logger_publish_latency_seconds",
            "Time taken to hand one sample to the broker"
        )
        .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    )
    .unwrap();
    pub static ref HEALTHY: Gauge = Gauge::with_opts(Opts::new(
        "logger_healthy",
        "1 when the most recent publish or poll succeeded, 0 otherwise"
    ))
    .unwrap();
}

pub fn init_metrics() {
    REGISTRY
        .register(Box::new(SAMPLES_PUBLISHED_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(SAMPLE_FAILURES_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(WEATHER_POLLS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(WEATHER_FAILURES_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(PUBLISH_LATENCY_SECONDS.clone()))
        .unwrap();
    REGISTRY.register(Box::new(HEALTHY.clone())).unwrap();
    HEALTHY.set(1.0);
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
