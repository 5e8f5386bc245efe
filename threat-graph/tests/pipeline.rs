use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use futures::future::join_all;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use threat_graph::config::ThreatGraphConfig;
use threat_graph::generator::describe_event;
use threat_graph::metrics::ThreatGraphMetrics;
use threat_graph::models::Event;
use threat_graph::queue;
use threat_graph::sender::GafferClient;
use threat_graph::service::{MessageHandler, ThreatGraphService};
use threat_graph::summariser::{self, ElementBatch};
use threat_graph_descriptions::GafferElement;

const HTTP_EVENT: &str = r#"{"network":"test-lan","origin":"device","dest":["ipv4:93.184.216.34","tcp:80","http"],"device":"debug","time":"2018-05-21T11:03:22.634Z","src":["ipv4:10.0.2.15","tcp:34060","http"],"http_request":{"header":{"User-Agent":"Wget/1.19.5 (linux-gnu)","Host":"www.example.org"},"method":"GET"},"action":"http_request"}"#;

fn element_key(element: &GafferElement) -> String {
    match element {
        GafferElement::Entity { vertex, group, .. } => format!("entity|{group}|{vertex}"),
        GafferElement::Edge {
            source,
            destination,
            group,
            ..
        } => format!("edge|{group}|{source}|{destination}"),
    }
}

/// Drives `batches` through `workers` summarisers sharing one inbound queue
/// and returns the per-key count totals over every flushed snapshot.
async fn run_summarisers(
    batches: Vec<ElementBatch>,
    workers: usize,
    flush_interval: Duration,
) -> HashMap<String, u64> {
    let (inbound_tx, inbound_rx) = mpsc::channel(100);
    let (delivery_tx, mut delivery_rx) = mpsc::channel::<Vec<GafferElement>>(100);
    let inbound_rx = queue::shared(inbound_rx);
    let shutdown = CancellationToken::new();

    let mut handles = Vec::new();
    for _ in 0..workers {
        handles.push(tokio::spawn(summariser::run(
            inbound_rx.clone(),
            delivery_tx.clone(),
            flush_interval,
            shutdown.clone(),
        )));
    }
    drop(delivery_tx);

    let collector = tokio::spawn(async move {
        let mut totals: HashMap<String, u64> = HashMap::new();
        while let Some(snapshot) = delivery_rx.recv().await {
            for element in &snapshot {
                *totals.entry(element_key(element)).or_insert(0) += element.properties().count;
            }
        }
        totals
    });

    for batch in batches {
        inbound_tx.send(batch).await.expect("inbound queue open");
    }
    drop(inbound_tx);

    join_all(handles).await;
    collector.await.expect("collector task")
}

fn http_event_batches(repeats: usize) -> Vec<ElementBatch> {
    let event: Event = serde_json::from_str(HTTP_EVENT).expect("decode event");
    let (elements, observed_at) = describe_event(&event);
    assert_eq!(elements.len(), 11);

    (0..repeats)
        .map(|i| ElementBatch {
            elements: elements.clone(),
            // Spread observations across seconds and hours.
            observed_at: observed_at + chrono::Duration::seconds(i as i64 * 60),
        })
        .collect()
}

#[tokio::test]
async fn test_counts_are_conserved_across_partitioned_workers() {
    let totals = run_summarisers(http_event_batches(100), 4, Duration::from_millis(5)).await;

    // Partial windows may split a key across many snapshots, but the totals
    // must equal the updates issued.
    assert_eq!(totals.len(), 11);
    for (key, total) in &totals {
        assert_eq!(*total, 100, "key: {}", key);
    }
}

#[tokio::test]
async fn test_residual_state_flushes_when_inbound_closes() {
    // A flush interval far longer than the test means every snapshot comes
    // from the drain path.
    let totals = run_summarisers(http_event_batches(10), 3, Duration::from_secs(600)).await;

    assert_eq!(totals.len(), 11);
    for total in totals.values() {
        assert_eq!(*total, 10);
    }
}

#[tokio::test]
async fn test_malformed_messages_leave_pipeline_clean() {
    let config = ThreatGraphConfig::try_parse_from([
        "threat-graph",
        "--summary-workers",
        "2",
        "--sender-workers",
        "2",
    ])
    .expect("config");
    let client = Arc::new(GafferClient::new(&config).expect("client"));
    let metrics = ThreatGraphMetrics::new("threat-graph-test");
    let shutdown = CancellationToken::new();

    let (service, workers) =
        ThreatGraphService::spawn(&config, client, metrics, shutdown.clone());

    // Undecodable bytes and element-free events are dropped before the
    // queues; no delivery is attempted and teardown stays clean.
    service.handle_message(b"not json").await;
    service.handle_message(b"{\"action\":\"connection_up\"}").await;

    drop(service);
    tokio::time::timeout(Duration::from_secs(5), join_all(workers))
        .await
        .expect("workers wind down");
}
