//! Band proportion normalization and frequency weighting.
//!
//! Raw band power is not comparable across bands: low-frequency bands carry
//! far more power at baseline. The weighted form multiplies each band by its
//! representative frequency raised to a small exponent before normalizing,
//! which lifts the faster bands for display and dominance checks.

use serde::{Deserialize, Serialize};

use crate::types::{Band, BandSample};

/// Default exponent applied to representative frequencies.
pub const DEFAULT_WEIGHTING_POWER: f64 = 0.5;

/// Midpoint of the 0.5-4 Hz delta range.
pub const DELTA_MIDPOINT_HZ: f64 = 2.25;
/// Fixed low delta frequency used by the classifier.
pub const DELTA_FIXED_HZ: f64 = 2.0;
pub const THETA_MIDPOINT_HZ: f64 = 6.0;
pub const ALPHA_MIDPOINT_HZ: f64 = 10.0;
pub const BETA_MIDPOINT_HZ: f64 = 21.0;
/// Fixed gamma frequency used by the classifier.
pub const GAMMA_FIXED_HZ: f64 = 30.0;
/// Midpoint of the 30-48 Hz gamma range used for display.
pub const GAMMA_NARROW_MIDPOINT_HZ: f64 = 39.0;
/// Midpoint of the full 30-100 Hz gamma range; the waveform center.
pub const GAMMA_WIDE_MIDPOINT_HZ: f64 = 65.0;

/// Representative frequency per band, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeFrequencies {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl RepresentativeFrequencies {
    /// Frequencies used for displayed percentages and chart series.
    pub const DISPLAY: Self = Self {
        delta: DELTA_MIDPOINT_HZ,
        theta: THETA_MIDPOINT_HZ,
        alpha: ALPHA_MIDPOINT_HZ,
        beta: BETA_MIDPOINT_HZ,
        gamma: GAMMA_NARROW_MIDPOINT_HZ,
    };

    /// Frequencies used by the dominant-pattern classifier.
    pub const CLASSIFIER: Self = Self {
        delta: DELTA_FIXED_HZ,
        theta: THETA_MIDPOINT_HZ,
        alpha: ALPHA_MIDPOINT_HZ,
        beta: BETA_MIDPOINT_HZ,
        gamma: GAMMA_FIXED_HZ,
    };

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

    /// Multiplicative weight for `band` at `exponent`.
    #[must_use]
    pub fn weight(&self, band: Band, exponent: f64) -> f64 {
        self.get(band).powf(exponent)
    }
}

/// Plain proportions summing to 1.0. An all-zero input is returned as is.
#[must_use]
pub fn normalize(raw: &BandSample) -> BandSample {
    let sum = raw.sum();
    if sum == 0.0 {
        return *raw;
    }
    raw.scaled(1.0 / sum)
}

/// Frequency-weighted proportions summing to 1.0.
///
/// Each band is multiplied by `freqs.get(band)^exponent` and the result is
/// re-normalized. A zero total yields all zeros.
#[must_use]
pub fn weighted_normalize(
    raw: &BandSample,
    freqs: &RepresentativeFrequencies,
    exponent: f64,
) -> BandSample {
    let weighted = BandSample::from_fn(|b| raw.get(b) * freqs.weight(b, exponent));
    normalize(&weighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> BandSample {
        BandSample { alpha: 10.0, beta: 5.0, gamma: 1.0, delta: 1.0, theta: 3.0 }
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let inputs = [
            example(),
            BandSample::new(0.0, 0.0, 0.0, 0.0, 7.0),
            BandSample::new(1e-9, 2e-9, 3e-9, 4e-9, 5e-9),
            BandSample::new(1e6, 3.5, 0.25, 42.0, 9.0),
        ];
        for raw in inputs {
            let n = normalize(&raw);
            assert!((n.sum() - 1.0).abs() < 1e-9, "sum={} for {:?}", n.sum(), raw);
        }
        let n = normalize(&example());
        assert!((n.alpha - 0.5).abs() < 1e-12);
        assert!((n.theta - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_all_zero_unchanged() {
        let zero = BandSample::default();
        assert_eq!(normalize(&zero), zero);
    }

    #[test]
    fn test_weighted_shifts_mass_upward() {
        let flat = BandSample::new(1.0, 1.0, 1.0, 1.0, 1.0);
        let w = weighted_normalize(&flat, &RepresentativeFrequencies::DISPLAY, DEFAULT_WEIGHTING_POWER);
        assert!((w.sum() - 1.0).abs() < 1e-9);
        assert!(w.gamma > w.beta && w.beta > w.alpha && w.alpha > w.theta && w.theta > w.delta);
    }

    #[test]
    fn test_weighted_exponent_zero_is_plain() {
        let a = weighted_normalize(&example(), &RepresentativeFrequencies::CLASSIFIER, 0.0);
        let b = normalize(&example());
        for band in Band::ALL {
            assert!((a.get(band) - b.get(band)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weighted_zero_input() {
        let w = weighted_normalize(&BandSample::default(), &RepresentativeFrequencies::DISPLAY, 0.5);
        assert_eq!(w, BandSample::default());
    }

    #[test]
    fn test_weighted_is_scale_invariant() {
        let a = weighted_normalize(&example(), &RepresentativeFrequencies::CLASSIFIER, 0.5);
        let b = weighted_normalize(&normalize(&example()), &RepresentativeFrequencies::CLASSIFIER, 0.5);
        for band in Band::ALL {
            assert!((a.get(band) - b.get(band)).abs() < 1e-12);
        }
    }
}
