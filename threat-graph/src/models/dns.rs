use serde::Deserialize;

/// DNS payload of a `dns_message` event. `kind` is kept as the raw wire
/// string; types other than `query`/`response` simply drive no extraction
/// rules.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DnsMessage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub query: Vec<DnsQueryRecord>,
    #[serde(default)]
    pub answer: Vec<DnsAnswerRecord>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DnsQueryRecord {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DnsAnswerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}
