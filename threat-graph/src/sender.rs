//! Delivery worker: wraps flushed snapshots in the bulk-load envelope and
//! PUTs them to the store over a shared connection pool, with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use threat_graph_descriptions::{AddElements, GafferElement};

use crate::config::ThreatGraphConfig;
use crate::error::DeliveryError;
use crate::metrics::ThreatGraphMetrics;
use crate::queue::{self, SharedReceiver};

const ADD_ELEMENTS_PATH: &str = "/graph/doOperation/add/elements";

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub limit: usize,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ThreatGraphConfig) -> RetryPolicy {
        RetryPolicy {
            limit: config.send_retry_limit,
            interval: Duration::from_millis(config.send_retry_millis),
        }
    }
}

/// HTTP client for the store's bulk add-elements operation. Shared by all
/// delivery workers; pool hygiene (idle cap per host, idle timeout) bounds
/// connection growth and recovers from store restarts.
pub struct GafferClient {
    client: reqwest::Client,
    operation_url: String,
}

impl GafferClient {
    pub fn new(config: &ThreatGraphConfig) -> Result<GafferClient, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gaffer_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_secs))
            .build()?;

        Ok(GafferClient {
            client,
            operation_url: format!(
                "{}{}",
                config.gaffer_url.trim_end_matches('/'),
                ADD_ELEMENTS_PATH
            ),
        })
    }

    pub fn operation_url(&self) -> &str {
        &self.operation_url
    }

    /// Submits one batch, retrying per `retry` on transport errors and
    /// non-204 responses. The shutdown token is checked between attempts.
    /// Batches are at-most-once: exhaustion drops the batch.
    pub async fn add_elements(
        &self,
        elements: Vec<GafferElement>,
        retry: &RetryPolicy,
        shutdown: &CancellationToken,
    ) -> Result<(), DeliveryError> {
        let operation = AddElements::new(elements);
        let body = serde_json::to_vec(&operation)?;

        for attempt in 1..=retry.limit {
            if shutdown.is_cancelled() {
                return Err(DeliveryError::Cancelled);
            }

            match self.put_elements(body.clone()).await {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(
                        message = "delivery attempt failed",
                        attempt,
                        error = %error,
                    );
                    if attempt < retry.limit {
                        tokio::time::sleep(retry.interval).await;
                    }
                }
            }
        }

        Err(DeliveryError::RetriesExhausted(retry.limit))
    }

    async fn put_elements(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        let response = self
            .client
            .put(&self.operation_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        // Drain the body so the connection can return to the pool.
        let detail = response.bytes().await.unwrap_or_default();

        if status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            tracing::warn!(
                message = "graph store rejected elements",
                status = %status,
                detail = %String::from_utf8_lossy(&detail),
            );
            Err(DeliveryError::UnexpectedStatus(status))
        }
    }
}

pub async fn run(
    client: Arc<GafferClient>,
    delivery: SharedReceiver<Vec<GafferElement>>,
    retry: RetryPolicy,
    shutdown: CancellationToken,
    metrics: ThreatGraphMetrics,
) {
    loop {
        let batch = tokio::select! {
            _ = shutdown.cancelled() => return,
            batch = queue::recv(&delivery) => match batch {
                Some(batch) => batch,
                None => return,
            },
        };

        let elements = batch.len();
        match client.add_elements(batch, &retry, &shutdown).await {
            Ok(()) => metrics.batch_delivered(elements),
            Err(DeliveryError::Cancelled) => return,
            Err(error) => {
                tracing::error!(
                    message = "dropping batch",
                    error = %error,
                    elements,
                );
                metrics.batch_dropped();
            }
        }
    }
}
