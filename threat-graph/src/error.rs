/// Errors raised while delivering a batch to the graph store.
#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("failed to serialize add-elements operation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("graph store returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("delivery cancelled by shutdown")]
    Cancelled,

    #[error("retries exhausted after {0} attempts")]
    RetriesExhausted(usize),
}
