/// Runtime configuration, sourced from the environment.
#[derive(clap::Parser, Clone, Debug)]
pub struct ThreatGraphConfig {
    /// Base URL of the Gaffer REST API.
    #[clap(
        long,
        env = "GAFFER_URL",
        default_value = "http://gaffer-threat:8080/rest/v1"
    )]
    pub gaffer_url: String,

    /// Number of windowed aggregation tasks draining the inbound queue.
    #[clap(long, env = "SUMMARY_WORKERS", default_value_t = 6)]
    pub summary_workers: usize,

    /// Number of delivery tasks draining the delivery queue.
    #[clap(long, env = "SENDER_WORKERS", default_value_t = 6)]
    pub sender_workers: usize,

    /// Capacity of the inbound and delivery queues.
    #[clap(long, env = "QUEUE_CAPACITY", default_value_t = 100)]
    pub queue_capacity: usize,

    /// Aggregation window flush period, in milliseconds.
    #[clap(long, env = "SUMMARY_FLUSH_MILLIS", default_value_t = 100)]
    pub summary_flush_millis: u64,

    /// Delivery attempts per batch before it is dropped.
    #[clap(long, env = "SEND_RETRY_LIMIT", default_value_t = 50)]
    pub send_retry_limit: usize,

    /// Pause between delivery attempts, in milliseconds.
    #[clap(long, env = "SEND_RETRY_MILLIS", default_value_t = 1000)]
    pub send_retry_millis: u64,

    /// Per-request timeout against the store, in seconds.
    #[clap(long, env = "GAFFER_TIMEOUT_SECS", default_value_t = 5)]
    pub gaffer_timeout_secs: u64,

    /// Idle connections kept pooled per host.
    #[clap(long, env = "POOL_MAX_IDLE_PER_HOST", default_value_t = 5)]
    pub pool_max_idle_per_host: usize,

    /// Idle period after which pooled connections are closed, in seconds.
    #[clap(long, env = "POOL_IDLE_SECS", default_value_t = 10)]
    pub pool_idle_secs: u64,
}
