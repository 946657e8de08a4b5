//! In-memory reading source for tests.
//!
//! Not used by the binary. Unit and integration tests build a
//! [`StaticSource`] with canned readings instead of calling the band API.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ClientError, RawReading, Reading, ReadingRequest, ReadingSource};

/// Serves pre-loaded raw readings keyed by headband.
///
/// Unknown headbands fail with [`ClientError::Unavailable`]. Every request is
/// recorded so callers can check what was asked for.
#[derive(Debug, Default)]
pub struct StaticSource {
    readings: HashMap<i64, RawReading>,
    requests: Mutex<Vec<ReadingRequest>>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reading(mut self, headband: i64, reading: RawReading) -> Self {
        self.readings.insert(headband, reading);
        self
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ReadingRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ReadingSource for StaticSource {
    async fn fetch(&self, request: ReadingRequest) -> Result<Reading, ClientError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request);
        }
        let mut raw = self
            .readings
            .get(&request.headband)
            .cloned()
            .ok_or_else(|| ClientError::Unavailable(format!("headband {}", request.headband)))?;
        if raw.run.is_none() {
            raw.run = request.run;
        }
        Ok(raw.into_reading())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_serves_and_records() {
        let source = StaticSource::new().with_reading(2, RawReading::default());
        let reading = source.fetch(ReadingRequest { headband: 2, run: Some(9) }).await.unwrap();
        assert_eq!(reading.run, Some(9));
        assert_eq!(source.requests(), vec![ReadingRequest { headband: 2, run: Some(9) }]);
    }

    #[tokio::test]
    async fn test_static_source_unknown_headband() {
        let source = StaticSource::new();
        let err = source.fetch(ReadingRequest { headband: 4, run: None }).await.unwrap_err();
        assert!(matches!(err, ClientError::Unavailable(_)));
    }
}
