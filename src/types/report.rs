//! Render-ready records handed to the UI layer.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::{Band, MlAnalysis, PatternLabel};

/// Literal shown in every numeric display field when data is unavailable.
pub const UNAVAILABLE_PLACEHOLDER: &str = "X";

/// A numeric display field, or the unavailable placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    Number(f64),
    Placeholder,
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Placeholder => serializer.serialize_str(UNAVAILABLE_PLACEHOLDER),
        }
    }
}

/// Which path produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Headband data was fetched and classified.
    Data,
    /// No usable headband; fortune keyed by a timestamp.
    Fortune,
    /// The fetch failed.
    Unavailable,
}

/// Chart-ready arrays: one label per slice, per-band percentages per slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub bands: BTreeMap<Band, Vec<f64>>,
    pub activeness: Vec<f64>,
}

/// Everything the page needs to draw one session.
#[derive(Debug, Clone, Serialize)]
pub struct FortuneReport {
    pub mode: ReportMode,
    /// Canonical identifier token for the URL, when one can be formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headband: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<String>,
    /// Display-weighted band percentages (0-100).
    pub band_percentages: BTreeMap<Band, DisplayValue>,
    pub ml: BTreeMap<String, DisplayValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<PatternLabel>,
    pub fortune: String,
    /// SVG path per band for the animated previews.
    pub waveforms: BTreeMap<Band, String>,
    pub chart: ChartData,
}

impl FortuneReport {
    /// Blank report for `mode`, every display field set to the placeholder.
    #[must_use]
    pub fn placeholder(mode: ReportMode, fortune: impl Into<String>) -> Self {
        Self {
            mode,
            id: None,
            headband: None,
            run: None,
            timestamp: None,
            start_timestamp: None,
            band_percentages: Band::ALL
                .into_iter()
                .map(|b| (b, DisplayValue::Placeholder))
                .collect(),
            ml: ml_fields(None),
            label: None,
            fortune: fortune.into(),
            waveforms: BTreeMap::new(),
            chart: ChartData::default(),
        }
    }
}

/// ML display fields keyed by name.
#[must_use]
pub fn ml_fields(ml: Option<&MlAnalysis>) -> BTreeMap<String, DisplayValue> {
    let value = |v: f64| ml.map_or(DisplayValue::Placeholder, |_| DisplayValue::Number(v));
    let ml_or_default = ml.copied().unwrap_or_default();
    BTreeMap::from([
        ("focus".to_string(), value(ml_or_default.focus)),
        ("clear".to_string(), value(ml_or_default.clear)),
        ("meditation".to_string(), value(ml_or_default.meditation)),
        ("dream".to_string(), value(ml_or_default.dream)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_serializes_as_x() {
        let report = FortuneReport::placeholder(ReportMode::Unavailable, "sorry");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "unavailable");
        assert_eq!(json["band_percentages"]["alpha"], "X");
        assert_eq!(json["ml"]["focus"], "X");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_ml_fields_with_values() {
        let ml = MlAnalysis { focus: 0.5, clear: 0.25, meditation: 1.5, dream: 0.0 };
        let fields = ml_fields(Some(&ml));
        assert_eq!(fields["meditation"], DisplayValue::Number(1.5));
        assert_eq!(fields["dream"], DisplayValue::Number(0.0));
    }
}
