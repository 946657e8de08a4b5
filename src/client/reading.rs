//! Wire model of the band API and its conversion into a [`Reading`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::processing::truncate_tail;
use crate::types::{Band, MlAnalysis, MlState, SeriesValue};

/// Suffix of the pre-smoothed variant of a field.
const SMOOTHED_SUFFIX: &str = "_smoothed";

/// Naive timestamp layouts accepted after RFC 3339 fails; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Request body for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRequest {
    pub headband: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<i64>,
}

/// Response body as sent by the band API.
///
/// Band and ML fields are kept loosely typed so one odd field does not
/// reject the whole reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RawReading {
    /// Field `name` as a number or array, preferring `{name}_smoothed`.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<SeriesValue> {
        let smoothed = format!("{name}{SMOOTHED_SUFFIX}");
        let found = [smoothed.as_str(), name].into_iter().find_map(|key| {
            let value = self.fields.get(key)?;
            match serde_json::from_value::<SeriesValue>(value.clone()) {
                Ok(series) => Some(series),
                Err(e) => {
                    debug!(field = key, error = %e, "Ignoring non-numeric field");
                    None
                }
            }
        });
        found
    }

    /// Typed view of the reading.
    #[must_use]
    pub fn into_reading(self) -> Reading {
        let bands = Band::ALL
            .into_iter()
            .filter_map(|band| self.series(band.as_str()).map(|s| (band, s)))
            .collect();
        let ml = MlSeries {
            focus: self.series(MlState::Focus.as_str()),
            clear: self.series(MlState::Clear.as_str()),
            meditation: self.series(MlState::Meditation.as_str()),
            dream: self.series(MlState::Dream.as_str()),
        };
        let activeness = self.series("activeness");
        let start_timestamp = self.start_timestamp.as_deref().and_then(parse_start_timestamp);

        Reading { bands, ml, activeness, start_timestamp, run: self.run }
    }
}

/// Parse a start timestamp: RFC 3339, or a naive ISO-8601 datetime taken as UTC.
#[must_use]
pub fn parse_start_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let parsed = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc());
    if parsed.is_none() {
        debug!(start_timestamp = s, "Unparseable start timestamp");
    }
    parsed
}

// ============================================================================
// Reading
// ============================================================================

/// ML score fields; each may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MlSeries {
    pub focus: Option<SeriesValue>,
    pub clear: Option<SeriesValue>,
    pub meditation: Option<SeriesValue>,
    pub dream: Option<SeriesValue>,
}

impl MlSeries {
    #[must_use]
    pub const fn get(&self, state: MlState) -> Option<&SeriesValue> {
        match state {
            MlState::Focus => self.focus.as_ref(),
            MlState::Clear => self.clear.as_ref(),
            MlState::Meditation => self.meditation.as_ref(),
            MlState::Dream => self.dream.as_ref(),
        }
    }

    /// Averages after dropping `trim` trailing samples from array fields.
    /// Missing fields average to zero.
    #[must_use]
    pub fn average(&self, trim: usize) -> MlAnalysis {
        let avg = |state| self.get(state).map_or(0.0, |s| trimmed(s, trim).average());
        MlAnalysis {
            focus: avg(MlState::Focus),
            clear: avg(MlState::Clear),
            meditation: avg(MlState::Meditation),
            dream: avg(MlState::Dream),
        }
    }
}

/// One fetched session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    /// Only the bands the response carried.
    pub bands: BTreeMap<Band, SeriesValue>,
    pub ml: MlSeries,
    pub activeness: Option<SeriesValue>,
    pub start_timestamp: Option<DateTime<Utc>>,
    /// Run actually served; may differ from the requested one.
    pub run: Option<i64>,
}

/// `value` with `count` trailing samples removed. Scalars pass through.
#[must_use]
pub fn trimmed(value: &SeriesValue, count: usize) -> SeriesValue {
    match value {
        SeriesValue::Samples(s) => SeriesValue::Samples(truncate_tail(s, count).to_vec()),
        SeriesValue::Scalar(v) => SeriesValue::Scalar(*v),
    }
}
