//! Band API client
//!
//! Readings come from a [`ReadingSource`]. Production uses
//! [`BrainwaveClient`], a single POST per page load with no retry. Tests use the
//! in-memory [`testing::StaticSource`].

mod http;
mod reading;
pub mod testing;

pub use http::BrainwaveClient;
pub use reading::{
    parse_start_timestamp, trimmed, MlSeries, RawReading, Reading, ReadingRequest,
};

use async_trait::async_trait;

/// Fetch failures. The pipeline treats every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("Malformed reading: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Reading unavailable: {0}")]
    Unavailable(String),
}

/// Where readings come from.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch one reading. `run: None` lets the server pick.
    async fn fetch(&self, request: ReadingRequest) -> Result<Reading, ClientError>;

    /// Human-readable name for logging.
    fn source_name(&self) -> &str;
}
