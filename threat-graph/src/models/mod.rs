//! Decoded event model. The action-dependent payload is resolved once at
//! decode time into a tagged variant rather than checked field-by-field in
//! the extractor.

mod address;
mod dns;
mod http;

pub use address::{parse_address, EndpointAddress};
pub use dns::{DnsAnswerRecord, DnsMessage, DnsQueryRecord};
pub use http::HttpRequest;

use serde::Deserialize;

/// One normalized telemetry event as supplied by the transport.
#[derive(Clone, Debug, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub src: Vec<String>,
    #[serde(default)]
    pub dest: Vec<String>,
    #[serde(flatten)]
    pub detail: EventDetail,
}

/// Action-specific payload, dispatched on the event's `action` tag. Actions
/// without graph-relevant payloads fall through to `Other`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action")]
pub enum EventDetail {
    #[serde(rename = "dns_message")]
    DnsMessage {
        #[serde(default)]
        dns_message: Option<DnsMessage>,
    },
    #[serde(rename = "http_request")]
    HttpRequest {
        #[serde(default)]
        http_request: Option<HttpRequest>,
    },
    #[serde(other)]
    Other,
}
