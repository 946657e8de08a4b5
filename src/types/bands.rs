//! EEG band records: per-slice samples, column-oriented series and the
//! auxiliary ML averages delivered alongside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Band
// ============================================================================

/// One of the five canonical EEG frequency ranges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// Delta: 0.5-4 Hz (deep sleep)
    Delta,
    /// Theta: 4-8 Hz (drowsiness, memory)
    Theta,
    /// Alpha: 8-12 Hz (relaxed, eyes closed)
    Alpha,
    /// Beta: 12-30 Hz (active thinking)
    Beta,
    /// Gamma: 30-100 Hz (cognitive processing)
    Gamma,
}

impl Band {
    /// Storage / wire order.
    pub const ALL: [Band; 5] = [Band::Delta, Band::Theta, Band::Alpha, Band::Beta, Band::Gamma];

    /// Comparison order used when picking a dominant band. Earlier bands
    /// win ties.
    pub const DOMINANCE_ORDER: [Band; 5] =
        [Band::Alpha, Band::Beta, Band::Gamma, Band::Theta, Band::Delta];

    /// Lower-case name, as used in JSON fields and label keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delta => "delta",
            Self::Theta => "theta",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
        }
    }

    /// Frequency range (low, high) in Hz.
    #[must_use]
    pub const fn range_hz(self) -> (f64, f64) {
        match self {
            Self::Delta => (0.5, 4.0),
            Self::Theta => (4.0, 8.0),
            Self::Alpha => (8.0, 12.0),
            Self::Beta => (12.0, 30.0),
            Self::Gamma => (30.0, 100.0),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delta" => Ok(Self::Delta),
            "theta" => Ok(Self::Theta),
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "gamma" => Ok(Self::Gamma),
            other => Err(format!("unknown band '{other}'")),
        }
    }
}

// ============================================================================
// BandSample
// ============================================================================

/// Five non-negative band powers for one 2-second slice, or an average of
/// several slices. Also used for normalized proportions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandSample {
    pub const fn new(delta: f64, theta: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { delta, theta, alpha, beta, gamma }
    }

    #[must_use]
    pub const fn get(&self, band: Band) -> f64 {
        match band {
            Band::Delta => self.delta,
            Band::Theta => self.theta,
            Band::Alpha => self.alpha,
            Band::Beta => self.beta,
            Band::Gamma => self.gamma,
        }
    }

    pub fn set(&mut self, band: Band, value: f64) {
        match band {
            Band::Delta => self.delta = value,
            Band::Theta => self.theta = value,
            Band::Alpha => self.alpha = value,
            Band::Beta => self.beta = value,
            Band::Gamma => self.gamma = value,
        }
    }

    /// Build a sample by evaluating `f` for every band.
    pub fn from_fn(mut f: impl FnMut(Band) -> f64) -> Self {
        let mut sample = Self::default();
        for band in Band::ALL {
            sample.set(band, f(band));
        }
        sample
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        Band::ALL.iter().map(|&b| self.get(b)).sum()
    }

    /// Largest value among the five bands.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        Band::ALL.iter().map(|&b| self.get(b)).fold(0.0_f64, f64::max)
    }

    /// Scale every band by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_fn(|b| self.get(b) * factor)
    }
}

// ============================================================================
// BandSeries
// ============================================================================

/// Column-oriented series: one sample array per band, all equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub delta: Vec<f64>,
    pub theta: Vec<f64>,
    pub alpha: Vec<f64>,
    pub beta: Vec<f64>,
    pub gamma: Vec<f64>,
}

impl BandSeries {
    #[must_use]
    pub fn get(&self, band: Band) -> &[f64] {
        match band {
            Band::Delta => &self.delta,
            Band::Theta => &self.theta,
            Band::Alpha => &self.alpha,
            Band::Beta => &self.beta,
            Band::Gamma => &self.gamma,
        }
    }

    pub fn get_mut(&mut self, band: Band) -> &mut Vec<f64> {
        match band {
            Band::Delta => &mut self.delta,
            Band::Theta => &mut self.theta,
            Band::Alpha => &mut self.alpha,
            Band::Beta => &mut self.beta,
            Band::Gamma => &mut self.gamma,
        }
    }

    /// Number of slices. Arrays of unequal length are cut to the shortest.
    #[must_use]
    pub fn len(&self) -> usize {
        Band::ALL.iter().map(|&b| self.get(b).len()).min().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sample at slice `index`, if every band has one.
    #[must_use]
    pub fn sample(&self, index: usize) -> Option<BandSample> {
        if index >= self.len() {
            return None;
        }
        Some(BandSample::from_fn(|b| self.get(b)[index]))
    }
}

// ============================================================================
// SeriesValue
// ============================================================================

/// A wire value that may be a scalar or an array of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Scalar(f64),
    Samples(Vec<f64>),
}

impl SeriesValue {
    /// Samples view. A scalar becomes a one-element sequence.
    #[must_use]
    pub fn to_samples(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Samples(v) => v.clone(),
        }
    }

    /// Scalar summary: the value itself, or the mean of the samples.
    #[must_use]
    pub fn average(&self) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Samples(v) => mean(v),
        }
    }
}

// ============================================================================
// MlAnalysis
// ============================================================================

/// Averaged ML state scores. Non-negative, no fixed upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MlAnalysis {
    pub focus: f64,
    pub clear: f64,
    pub meditation: f64,
    pub dream: f64,
}

/// Arithmetic mean; zero for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_round_trips_through_name() {
        for band in Band::ALL {
            assert_eq!(band.as_str().parse::<Band>(), Ok(band));
        }
        assert!("kappa".parse::<Band>().is_err());
    }

    #[test]
    fn test_series_len_uses_shortest_band() {
        let series = BandSeries {
            delta: vec![1.0, 2.0, 3.0],
            theta: vec![1.0, 2.0],
            alpha: vec![1.0, 2.0, 3.0],
            beta: vec![1.0, 2.0, 3.0],
            gamma: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(series.len(), 2);
        assert!(series.sample(2).is_none());
        assert_eq!(series.sample(1).map(|s| s.theta), Some(2.0));
    }

    #[test]
    fn test_series_value_accepts_scalar_or_array() {
        let scalar: SeriesValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(scalar, SeriesValue::Scalar(0.5));
        assert_eq!(scalar.to_samples(), vec![0.5]);

        let array: SeriesValue = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(array, SeriesValue::Samples(vec![1.0, 2.0, 3.0]));
        assert!((array.average() - 2.0).abs() < 1e-12);
    }
}
