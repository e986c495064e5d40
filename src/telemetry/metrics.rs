//! Prometheus metrics

use metrics::Label;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Time to run the extraction pipeline on one message
    Extraction,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Messages run through the extractor
    MessagesProcessed,
    /// Messages that yielded a signal
    SignalsDetected,
    /// Messages without a usable signal
    NoSignal,
    /// Internal extraction faults
    ExtractionFailures,
    /// Signals stopped by the filter
    SignalsRejected,
    /// Signals that passed the filter
    SignalsForwarded,
}

impl LatencyMetric {
    pub fn name(&self) -> &'static str {
        match self {
            LatencyMetric::Extraction => "signal_scraper_extraction_latency_ms",
        }
    }
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::MessagesProcessed => "signal_scraper_messages_total",
            CounterMetric::SignalsDetected => "signal_scraper_signals_total",
            CounterMetric::NoSignal => "signal_scraper_no_signal_total",
            CounterMetric::ExtractionFailures => "signal_scraper_extraction_failures_total",
            CounterMetric::SignalsRejected => "signal_scraper_rejected_total",
            CounterMetric::SignalsForwarded => "signal_scraper_forwarded_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    metrics::histogram!(metric.name()).record(duration.as_secs_f64() * 1000.0);
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric, labels: &[(&'static str, &'static str)]) {
    let labels: Vec<Label> = labels
        .iter()
        .map(|(key, value)| Label::new(*key, *value))
        .collect();
    metrics::counter!(metric.name(), labels).increment(1);
}
