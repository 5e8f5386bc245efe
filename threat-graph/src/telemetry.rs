use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initializes JSON logging to stdout with env-filter control. The returned
/// guard must be held for the life of the process so buffered lines flush.
pub fn setup_tracing(service_name: &str) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let log_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(log_layer)
        .init();

    tracing::info!(service_name, "logger configured successfully");

    guard
}
