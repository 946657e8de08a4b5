//! Fortune Pipeline
//!
//! ```text
//! query ─► resolve ─┬─ Data ──────► fetch ─► trim ─► average ─► normalize
//!                   │                 │                            │
//!                   │                 └─ error ─► unavailable      ▼
//!                   │                                  classify ─► select ─► waveform ─► report
//!                   ├─ Fortune{ts} ─► fortune report
//!                   └─ FortuneNow ──► delay ─► fortune report (now)
//! ```
//!
//! Exactly one fetch per report. A fetch error is caught here, once, and
//! turned into the unavailable report; nothing is retried.

mod derive;

pub use derive::{derive_report, fortune_report, trim_bands, TrimmedBands};

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::classifier::PatternPolicy;
use crate::client::{ReadingRequest, ReadingSource};
use crate::config::FortuneConfig;
use crate::fortune::APOLOGY_FORTUNE;
use crate::identifier::{PageQuery, PageRequest};
use crate::types::{FortuneReport, ReportMode};

/// Turns page requests into reports against one reading source.
pub struct FortunePipeline {
    source: Arc<dyn ReadingSource>,
    classifier: Box<dyn PatternPolicy>,
    config: FortuneConfig,
}

impl FortunePipeline {
    /// Build with the classifier policy named in `config`.
    pub fn new(source: Arc<dyn ReadingSource>, config: FortuneConfig) -> Self {
        let classifier = config.policy.classifier.build(&config);
        info!(
            source = source.source_name(),
            classifier = classifier.name(),
            waveform = ?config.policy.waveform,
            "Fortune pipeline ready"
        );
        Self { source, classifier, config }
    }

    #[must_use]
    pub fn config(&self) -> &FortuneConfig {
        &self.config
    }

    /// Resolve raw page parameters and build the report.
    pub async fn report_for_query(&self, query: &PageQuery) -> FortuneReport {
        let request = query.resolve(&self.config.page.headbands());
        self.report(request).await
    }

    pub async fn report(&self, request: PageRequest) -> FortuneReport {
        match request {
            PageRequest::Data { headband, run } => self.data_report(headband, run).await,
            PageRequest::Fortune { timestamp } => fortune_report(timestamp),
            PageRequest::FortuneNow => {
                let delay = self.config.page.fortune_delay_ms;
                if delay > 0 {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                fortune_report(now_millis())
            }
        }
    }

    async fn data_report(&self, headband: i64, run: Option<i64>) -> FortuneReport {
        let reading = match self.source.fetch(ReadingRequest { headband, run }).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(headband, run = ?run, source = self.source.source_name(), error = %e, "Reading fetch failed");
                return FortuneReport::placeholder(ReportMode::Unavailable, APOLOGY_FORTUNE);
            }
        };

        let report = derive_report(
            &reading,
            headband,
            run,
            &self.config,
            self.classifier.as_ref(),
            self.config.policy.waveform,
        );
        info!(
            headband,
            run = ?report.run,
            label = ?report.label.as_ref().map(|l| l.key()),
            "Fortune derived"
        );
        report
    }
}

/// Current epoch time in milliseconds.
#[must_use]
pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StaticSource;
    use crate::client::RawReading;
    use crate::fortune::fortune_for_timestamp;
    use serde_json::json;

    fn pipeline(source: StaticSource) -> FortunePipeline {
        let mut config = FortuneConfig::default();
        config.page.fortune_delay_ms = 0;
        FortunePipeline::new(Arc::new(source), config)
    }

    fn raw() -> RawReading {
        serde_json::from_value(json!({
            "alpha": [10.0, 10.0], "beta": [5.0, 5.0], "gamma": [1.0, 1.0],
            "delta": [1.0, 1.0], "theta": [3.0, 2.0],
            "run": 8
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unavailable() {
        let p = pipeline(StaticSource::new());
        let report = p.report(PageRequest::Data { headband: 1, run: None }).await;
        assert_eq!(report.mode, ReportMode::Unavailable);
        assert_eq!(report.fortune, APOLOGY_FORTUNE);
        assert_eq!(report.id, None);
    }

    #[tokio::test]
    async fn test_data_report_uses_source() {
        let source = Arc::new(StaticSource::new().with_reading(2, raw()));
        let mut config = FortuneConfig::default();
        config.page.fortune_delay_ms = 0;
        let p = FortunePipeline::new(source.clone(), config);

        let report = p.report(PageRequest::Data { headband: 2, run: Some(3) }).await;
        assert_eq!(report.mode, ReportMode::Data);
        assert_eq!(report.run, Some(8));
        assert_eq!(source.requests(), vec![ReadingRequest { headband: 2, run: Some(3) }]);
    }

    #[tokio::test]
    async fn test_fortune_token_skips_fetch() {
        let p = pipeline(StaticSource::new());
        let report = p.report(PageRequest::Fortune { timestamp: 42 }).await;
        assert_eq!(report.mode, ReportMode::Fortune);
        assert_eq!(report.fortune, fortune_for_timestamp(42));
    }

    #[tokio::test]
    async fn test_out_of_range_headband_is_fortune_now() {
        let p = pipeline(StaticSource::new().with_reading(11, raw()));
        let query = PageQuery { headband: Some("11".into()), ..PageQuery::default() };
        let before = now_millis();
        let report = p.report_for_query(&query).await;
        assert_eq!(report.mode, ReportMode::Fortune);
        assert!(report.timestamp.unwrap() >= before);
    }
}
