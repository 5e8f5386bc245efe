//! Pipeline wiring: the message handler fed by the transport, the bounded
//! queues between stages, and the worker tasks that drain them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ThreatGraphConfig;
use crate::generator::describe_event;
use crate::metrics::ThreatGraphMetrics;
use crate::models::Event;
use crate::queue;
use crate::sender::{self, GafferClient, RetryPolicy};
use crate::summariser::{self, ElementBatch};

/// Seam to the transport that supplies raw event bytes.
#[async_trait::async_trait]
pub trait MessageHandler {
    async fn handle_message(&self, body: &[u8]);
}

/// Front of the pipeline. Dropping the service closes the inbound queue,
/// which drains the aggregation workers and, through them, the delivery
/// workers.
pub struct ThreatGraphService {
    inbound: mpsc::Sender<ElementBatch>,
    metrics: ThreatGraphMetrics,
}

impl ThreatGraphService {
    /// Spawns the aggregation and delivery workers and returns the handler
    /// plus the worker handles to join on shutdown.
    pub fn spawn(
        config: &ThreatGraphConfig,
        client: Arc<GafferClient>,
        metrics: ThreatGraphMetrics,
        shutdown: CancellationToken,
    ) -> (ThreatGraphService, Vec<JoinHandle<()>>) {
        let (inbound_tx, inbound_rx) = mpsc::channel(config.queue_capacity);
        let (delivery_tx, delivery_rx) = mpsc::channel(config.queue_capacity);

        let inbound_rx = queue::shared(inbound_rx);
        let delivery_rx = queue::shared(delivery_rx);
        let flush_interval = Duration::from_millis(config.summary_flush_millis);
        let retry = RetryPolicy::from_config(config);

        let mut workers = Vec::with_capacity(config.summary_workers + config.sender_workers);

        for _ in 0..config.summary_workers {
            workers.push(tokio::spawn(summariser::run(
                inbound_rx.clone(),
                delivery_tx.clone(),
                flush_interval,
                shutdown.clone(),
            )));
        }
        // The summarisers hold the only senders; once they exit the
        // delivery queue closes and the senders drain out.
        drop(delivery_tx);

        for _ in 0..config.sender_workers {
            workers.push(tokio::spawn(sender::run(
                client.clone(),
                delivery_rx.clone(),
                retry.clone(),
                shutdown.clone(),
                metrics.clone(),
            )));
        }

        (
            ThreatGraphService {
                inbound: inbound_tx,
                metrics,
            },
            workers,
        )
    }

    /// Queues the graph elements for one decoded event. Events that resolve
    /// to no elements are discarded here.
    pub async fn handle_event(&self, event: Event) {
        let (elements, observed_at) = describe_event(&event);
        if elements.is_empty() {
            return;
        }

        self.metrics.event_latency(observed_at);

        let batch = ElementBatch {
            elements,
            observed_at,
        };
        if self.inbound.send(batch).await.is_err() {
            tracing::warn!("inbound queue closed, discarding event");
        }
    }
}

#[async_trait::async_trait]
impl MessageHandler for ThreatGraphService {
    async fn handle_message(&self, body: &[u8]) {
        match serde_json::from_slice::<Event>(body) {
            Ok(event) => self.handle_event(event).await,
            Err(error) => {
                self.metrics.decode_failure();
                tracing::warn!(message = "failed to decode event", error = %error);
            }
        }
    }
}
