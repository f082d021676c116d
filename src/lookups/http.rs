//! HTTP-backed lookup source
//!
//! Requires the `remote-lookups` feature to be enabled:
//! ```toml
//! finhealth = { version = "0.1", features = ["remote-lookups"] }
//! ```

use super::{FinancialDataSource, LookupData, LookupError};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches a JSON object from a fixed URL
#[cfg_attr(not(feature = "remote-lookups"), allow(dead_code))]
#[derive(Debug, Clone)]
pub struct HttpSource {
    name: &'static str,
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(name: &'static str, url: impl Into<String>) -> Self {
        Self {
            name,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[cfg(feature = "remote-lookups")]
    fn send_request(&self) -> Result<LookupData, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let response = client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| LookupError::InvalidPayload(e.to_string()))?;

        match json {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(LookupError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Stub implementation when the remote-lookups feature is disabled
    #[cfg(not(feature = "remote-lookups"))]
    fn send_request(&self) -> Result<LookupData, LookupError> {
        Err(LookupError::Disabled)
    }
}

impl FinancialDataSource for HttpSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch(&self) -> Result<LookupData, LookupError> {
        self.send_request()
    }
}

/// Check if remote lookups were compiled in
pub fn is_remote_lookup_available() -> bool {
    cfg!(feature = "remote-lookups")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let source = HttpSource::new("bank", "http://127.0.0.1:9/accounts").timeout(Duration::from_millis(200));
        assert_eq!(source.name(), "bank");
        assert_eq!(source.url(), "http://127.0.0.1:9/accounts");
    }

    #[test]
    fn availability_follows_feature() {
        assert_eq!(is_remote_lookup_available(), cfg!(feature = "remote-lookups"));
    }

    #[test]
    fn unreachable_endpoint_never_panics() {
        let source = HttpSource::new("gst", "http://127.0.0.1:9/filings").timeout(Duration::from_millis(200));
        // Disabled without the feature, a connection error with it
        assert!(source.fetch().is_err());
        assert!(super::super::fetch_or_empty(&source).is_empty());
    }
}
