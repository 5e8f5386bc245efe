use std::sync::Arc;

use clap::Parser;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use threat_graph::config::ThreatGraphConfig;
use threat_graph::metrics::ThreatGraphMetrics;
use threat_graph::sender::GafferClient;
use threat_graph::service::ThreatGraphService;
use threat_graph::source::run_stdin_source;
use threat_graph::telemetry::setup_tracing;

const SERVICE_NAME: &str = "threat-graph";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = setup_tracing(SERVICE_NAME);

    let config = ThreatGraphConfig::parse();
    let metrics = ThreatGraphMetrics::new(SERVICE_NAME);
    let client = Arc::new(GafferClient::new(&config)?);
    let shutdown = CancellationToken::new();

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
                shutdown.cancel();
            }
        });
    }

    let (service, workers) = ThreatGraphService::spawn(&config, client, metrics, shutdown.clone());
    tracing::info!(gaffer_url = %config.gaffer_url, "initialisation complete");

    run_stdin_source(&service, &shutdown).await?;

    // Close the inbound queue; the summarisers flush what they hold and the
    // senders drain the delivery queue behind them.
    drop(service);
    join_all(workers).await;

    Ok(())
}
