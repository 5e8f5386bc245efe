use std::collections::HashMap;

use serde::Deserialize;

/// HTTP payload of an `http_request` event.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HttpRequest {
    #[serde(default)]
    pub header: HashMap<String, String>,
    #[serde(default)]
    pub method: String,
}

impl HttpRequest {
    pub fn host(&self) -> &str {
        self.header_value("Host")
    }

    pub fn user_agent(&self) -> &str {
        self.header_value("User-Agent")
    }

    fn header_value(&self, name: &str) -> &str {
        self.header.get(name).map(String::as_str).unwrap_or("")
    }
}
