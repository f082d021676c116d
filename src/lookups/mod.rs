//! External data lookups (bank statements, GST filings)
//!
//! The engine calls these through [`FinancialDataSource`] so they can be
//! swapped for no-op or canned sources. A lookup never blocks or fails an
//! analysis: any error degrades to an empty map.

pub mod http;

pub use http::{is_remote_lookup_available, HttpSource};

use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object returned by a lookup
pub type LookupData = Map<String, Value>;

/// Error from an external lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup disabled")]
    Disabled,
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// A source of side data attached to an analysis
pub trait FinancialDataSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Fetch the data for the current analysis
    fn fetch(&self) -> Result<LookupData, LookupError>;
}

/// Source that is never configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSource;

impl FinancialDataSource for NoopSource {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn fetch(&self) -> Result<LookupData, LookupError> {
        Err(LookupError::Disabled)
    }
}

/// Source returning a fixed payload (tests, offline demos)
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: LookupData,
}

impl StaticSource {
    pub fn new(data: LookupData) -> Self {
        Self { data }
    }
}

impl FinancialDataSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn fetch(&self) -> Result<LookupData, LookupError> {
        Ok(self.data.clone())
    }
}

/// Run a lookup, degrading any failure to an empty map
pub fn fetch_or_empty(source: &dyn FinancialDataSource) -> LookupData {
    match source.fetch() {
        Ok(data) => data,
        Err(LookupError::Disabled) => {
            tracing::debug!(source = source.name(), "lookup disabled");
            LookupData::new()
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "lookup failed, continuing without it");
            LookupData::new()
        }
    }
}
