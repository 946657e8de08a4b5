//! Pure derivation from a fetched reading to a render-ready report.

use std::collections::BTreeMap;

use crate::classifier::{ClassifierInput, PatternPolicy};
use crate::client::{trimmed, Reading};
use crate::config::FortuneConfig;
use crate::fortune::{fortune_for_timestamp, select_fortune};
use crate::identifier::{encode_data, encode_fortune};
use crate::processing::{band_percent_series, synchronized_tail_len, time_labels, weighted_normalize};
use crate::types::{
    ml_fields, Band, BandSample, BandSeries, ChartData, DisplayValue, FortuneReport, ReportMode,
    SeriesValue,
};
use crate::waveform::{band_paths, WaveformPolicy};

/// Band values after tail trimming, in both shapes the report needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimmedBands {
    /// Samples removed from the end of every array field
    pub trim: usize,
    pub series: BandSeries,
    pub averages: BandSample,
}

/// Trim the synchronized tail across the five bands and average them.
///
/// Trimming only applies when all five bands arrived as arrays. Missing bands
/// average to zero and contribute an empty series.
#[must_use]
pub fn trim_bands(bands: &BTreeMap<Band, SeriesValue>) -> TrimmedBands {
    let arrays: Option<Vec<&[f64]>> = Band::ALL
        .iter()
        .map(|b| match bands.get(b) {
            Some(SeriesValue::Samples(s)) => Some(s.as_slice()),
            _ => None,
        })
        .collect();
    let trim = arrays.map_or(0, |a| synchronized_tail_len(&a));

    let mut series = BandSeries::default();
    let mut averages = BandSample::default();
    for band in Band::ALL {
        if let Some(value) = bands.get(&band) {
            let value = trimmed(value, trim);
            averages.set(band, value.average());
            *series.get_mut(band) = value.to_samples();
        }
    }
    TrimmedBands { trim, series, averages }
}

/// Build the data-mode report for `reading`.
///
/// `requested_run` is used for the canonical id only when the server did not
/// echo the run it served.
#[must_use]
pub fn derive_report(
    reading: &Reading,
    headband: i64,
    requested_run: Option<i64>,
    config: &FortuneConfig,
    classifier: &dyn PatternPolicy,
    waveform: WaveformPolicy,
) -> FortuneReport {
    let TrimmedBands { trim, series, averages } = trim_bands(&reading.bands);
    let activeness = reading
        .activeness
        .as_ref()
        .map(|a| trimmed(a, trim).to_samples())
        .unwrap_or_default();
    let ml = reading.ml.average(trim);

    let weighting = &config.weighting;
    let display = weighted_normalize(&averages, &weighting.display, weighting.display_exponent);
    let percentages = display.scaled(100.0);

    let label = classifier.classify(&ClassifierInput { bands: &averages, ml: &ml, activeness: &activeness });
    let fortune = select_fortune(&label, &averages, &ml);

    let chart = ChartData {
        labels: time_labels(series.len(), config.page.seconds_per_sample),
        bands: band_percent_series(&series, &weighting.display, weighting.display_exponent),
        activeness,
    };

    let run = reading.run.or(requested_run);

    FortuneReport {
        mode: ReportMode::Data,
        id: run.map(|r| encode_data(headband, r)),
        headband: Some(headband),
        run,
        timestamp: None,
        start_timestamp: reading.start_timestamp.map(|t| t.to_rfc3339()),
        band_percentages: Band::ALL
            .into_iter()
            .map(|b| (b, DisplayValue::Number(percentages.get(b))))
            .collect(),
        ml: ml_fields(Some(&ml)),
        label: Some(label),
        fortune: fortune.to_string(),
        waveforms: band_paths(&percentages, &config.waveform, waveform).into_iter().collect(),
        chart,
    }
}

/// Fortune-mode report keyed by `timestamp` (epoch milliseconds).
#[must_use]
pub fn fortune_report(timestamp: u64) -> FortuneReport {
    let mut report = FortuneReport::placeholder(ReportMode::Fortune, fortune_for_timestamp(timestamp));
    report.id = Some(encode_fortune(timestamp));
    report.timestamp = Some(timestamp);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierPolicy;
    use crate::client::MlSeries;
    use crate::fortune::messages_for;
    use crate::identifier::{decode, Identifier};
    use crate::types::{ActivenessState, PatternLabel};

    fn samples(v: &[f64]) -> SeriesValue {
        SeriesValue::Samples(v.to_vec())
    }

    fn reading() -> Reading {
        let bands = BTreeMap::from([
            (Band::Alpha, samples(&[10.0, 10.0, 10.0, 10.0])),
            (Band::Beta, samples(&[4.0, 6.0, 6.0, 6.0])),
            (Band::Gamma, samples(&[1.0, 1.0, 1.0, 1.0])),
            (Band::Delta, samples(&[1.0, 1.0, 1.0, 1.0])),
            (Band::Theta, samples(&[3.0, 3.0, 3.0, 3.0])),
        ]);
        Reading {
            bands,
            ml: MlSeries { meditation: Some(samples(&[0.2, 0.4, 0.9, 0.9])), ..MlSeries::default() },
            activeness: Some(samples(&[0.9, 0.8, 0.1, 0.1])),
            start_timestamp: None,
            run: Some(12),
        }
    }

    #[test]
    fn test_trim_applies_to_all_bands() {
        let t = trim_bands(&reading().bands);
        assert_eq!(t.trim, 2);
        assert_eq!(t.series.len(), 2);
        assert_eq!(t.averages, BandSample { alpha: 10.0, beta: 5.0, gamma: 1.0, delta: 1.0, theta: 3.0 });
    }

    #[test]
    fn test_scalar_band_disables_trim() {
        let mut bands = reading().bands;
        bands.insert(Band::Gamma, SeriesValue::Scalar(1.0));
        let t = trim_bands(&bands);
        assert_eq!(t.trim, 0);
        assert_eq!(t.series.gamma, vec![1.0]);
        assert!((t.averages.beta - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_band_averages_to_zero() {
        let mut bands = reading().bands;
        bands.remove(&Band::Delta);
        let t = trim_bands(&bands);
        assert_eq!(t.trim, 0);
        assert_eq!(t.averages.delta, 0.0);
        assert!(t.series.is_empty());
    }

    #[test]
    fn test_derive_report() {
        let config = FortuneConfig::default();
        let policy = ClassifierPolicy::ActivenessAware.build(&config);
        let report = derive_report(&reading(), 3, None, &config, policy.as_ref(), WaveformPolicy::Debiased);

        assert_eq!(report.mode, ReportMode::Data);
        assert_eq!(report.run, Some(12));
        assert_eq!(decode(report.id.as_deref().unwrap()), Some(Identifier::Data { headband: 3, run: 12 }));

        // Activeness and ML are trimmed with the bands: [0.9, 0.8] -> active.
        let label = PatternLabel::Banded { band: Band::Alpha, state: ActivenessState::Active };
        assert_eq!(report.label, Some(label));
        assert_eq!(report.chart.activeness, vec![0.9, 0.8]);
        assert_eq!(report.ml["meditation"], DisplayValue::Number(0.30000000000000004));
        assert!(messages_for("alpha_active").contains(&report.fortune.as_str()));

        let total: f64 = report
            .band_percentages
            .values()
            .map(|v| match v {
                DisplayValue::Number(n) => *n,
                DisplayValue::Placeholder => f64::NAN,
            })
            .sum();
        assert!((total - 100.0).abs() < 1e-9);

        assert_eq!(report.chart.labels, vec!["0s", "2s"]);
        assert_eq!(report.chart.bands[&Band::Alpha].len(), 2);
        assert_eq!(report.waveforms.len(), 5);
    }

    #[test]
    fn test_requested_run_is_fallback_for_id() {
        let config = FortuneConfig::default();
        let policy = ClassifierPolicy::MlPriority.build(&config);
        let mut r = reading();
        r.run = None;
        let report = derive_report(&r, 4, Some(77), &config, policy.as_ref(), WaveformPolicy::Raw);
        assert_eq!(decode(report.id.as_deref().unwrap()), Some(Identifier::Data { headband: 4, run: 77 }));

        let report = derive_report(&r, 4, None, &config, policy.as_ref(), WaveformPolicy::Raw);
        assert_eq!(report.id, None);
    }

    #[test]
    fn test_fortune_report() {
        let report = fortune_report(1_700_000_000_123);
        assert_eq!(report.mode, ReportMode::Fortune);
        assert_eq!(report.fortune, fortune_for_timestamp(1_700_000_000_123));
        assert_eq!(
            decode(report.id.as_deref().unwrap()),
            Some(Identifier::Fortune { timestamp: 1_700_000_000_123 })
        );
        assert_eq!(report.label, None);
    }
}
