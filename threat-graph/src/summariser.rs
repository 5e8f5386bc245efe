//! Windowed aggregation worker: drains the shared inbound queue into a
//! private summary and flushes it to the delivery queue on a timer.
//!
//! Several instances run concurrently against the same inbound queue. Each
//! owns its summary outright, so a key observed by more than one instance
//! within a window flushes as partial counts; the per-key totals across all
//! instances still sum to the number of updates issued.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use threat_graph_descriptions::{GafferElement, GraphElement, Summary};

use crate::queue::{self, SharedReceiver};

/// Elements derived from one event, stamped with the second-truncated
/// instant the event was observed at.
#[derive(Clone, Debug)]
pub struct ElementBatch {
    pub elements: Vec<GraphElement>,
    pub observed_at: DateTime<Utc>,
}

pub async fn run(
    inbound: SharedReceiver<ElementBatch>,
    delivery: mpsc::Sender<Vec<GafferElement>>,
    flush_interval: Duration,
    shutdown: CancellationToken,
) {
    let mut summary = Summary::new();
    let mut ticker = tokio::time::interval(flush_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                flush_residual(&mut summary, &delivery).await;
                return;
            }

            batch = queue::recv(&inbound) => match batch {
                Some(batch) => {
                    for element in &batch.elements {
                        summary.update(element, batch.observed_at);
                    }
                }
                None => {
                    flush_residual(&mut summary, &delivery).await;
                    return;
                }
            },

            _ = ticker.tick() => {
                if summary.is_empty() {
                    continue;
                }
                let snapshot = summary.snapshot();
                summary.reset();
                if delivery.send(snapshot).await.is_err() {
                    tracing::warn!("delivery queue closed, stopping aggregation");
                    return;
                }
            }
        }
    }
}

async fn flush_residual(summary: &mut Summary, delivery: &mpsc::Sender<Vec<GafferElement>>) {
    if summary.is_empty() {
        return;
    }

    let snapshot = summary.snapshot();
    summary.reset();
    if delivery.send(snapshot).await.is_err() {
        tracing::debug!("delivery queue closed before residual flush");
    }
}
