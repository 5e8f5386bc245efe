//! Statsd-style metric lines on stdout, in the `MONITORING|…` framing the
//! log pipeline scrapes. Handed to the handler and workers as a cloneable
//! capability rather than reached through a global.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

pub struct TagPair<'a>(pub &'a str, pub &'a str);

enum MetricType {
    Counter,
    Millis,
}

impl MetricType {
    fn statsd_type(&self) -> &'static str {
        match self {
            MetricType::Counter => "c",
            MetricType::Millis => "ms",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MetricReporter {
    service_name: String,
}

impl MetricReporter {
    pub fn new(service_name: &str) -> MetricReporter {
        MetricReporter {
            service_name: service_name.to_string(),
        }
    }

    pub fn counter(&self, metric_name: &str, value: f64, tags: &[TagPair]) {
        self.write_metric(metric_name, value, MetricType::Counter, tags);
    }

    pub fn millis(&self, metric_name: &str, value: f64) {
        self.write_metric(metric_name, value, MetricType::Millis, &[]);
    }

    fn write_metric(&self, metric_name: &str, value: f64, metric_type: MetricType, tags: &[TagPair]) {
        let line = statsd_format(&self.service_name, metric_name, value, metric_type, tags);
        println!(
            "MONITORING|{}|{}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            line
        );
    }
}

fn statsd_format(
    service_name: &str,
    metric_name: &str,
    value: f64,
    metric_type: MetricType,
    tags: &[TagPair],
) -> String {
    let mut buf = String::with_capacity(256);

    // write! to a String cannot fail.
    let _ = write!(
        buf,
        "{service_name}.{metric_name}:{value}|{metric_type}",
        metric_type = metric_type.statsd_type()
    );

    for (i, TagPair(tag_key, tag_value)) in tags.iter().enumerate() {
        let _ = write!(
            buf,
            "{separator}{tag_key}={tag_value}",
            separator = if i == 0 { "|#" } else { "," }
        );
    }

    buf
}

/// Service-specific metric surface, injected into the handler and workers.
#[derive(Clone, Debug)]
pub struct ThreatGraphMetrics {
    reporter: MetricReporter,
}

impl ThreatGraphMetrics {
    pub fn new(service_name: &str) -> ThreatGraphMetrics {
        ThreatGraphMetrics {
            reporter: MetricReporter::new(service_name),
        }
    }

    /// Latency from event capture to ingest. Skipped for events whose
    /// timestamp did not parse.
    pub fn event_latency(&self, observed_at: DateTime<Utc>) {
        if observed_at.timestamp() == 0 {
            return;
        }
        let latency = Utc::now().signed_duration_since(observed_at);
        self.reporter
            .millis("event_latency", latency.num_milliseconds() as f64);
    }

    pub fn decode_failure(&self) {
        self.reporter
            .counter("decode_failure", 1.0, &[TagPair("status", "fail")]);
    }

    pub fn batch_delivered(&self, elements: usize) {
        self.reporter.counter(
            "elements_delivered",
            elements as f64,
            &[TagPair("status", "success")],
        );
    }

    pub fn batch_dropped(&self) {
        self.reporter
            .counter("batch_dropped", 1.0, &[TagPair("status", "fail")]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statsd_format_without_tags() {
        let line = statsd_format("threat-graph", "event_latency", 12.5, MetricType::Millis, &[]);
        assert_eq!(line, "threat-graph.event_latency:12.5|ms");
    }

    #[test]
    fn test_statsd_format_with_tags() {
        let line = statsd_format(
            "threat-graph",
            "elements_delivered",
            11.0,
            MetricType::Counter,
            &[TagPair("status", "success"), TagPair("store", "gaffer")],
        );
        assert_eq!(
            line,
            "threat-graph.elements_delivered:11|c|#status=success,store=gaffer"
        );
    }
}
