//! Synthetic per-band spectra.

use std::f64::consts::TAU;

use crate::processing::normalize::{
    ALPHA_MIDPOINT_HZ, BETA_MIDPOINT_HZ, DELTA_MIDPOINT_HZ, GAMMA_WIDE_MIDPOINT_HZ,
    THETA_MIDPOINT_HZ,
};
use crate::types::Band;

/// Fixed synthetic spectrum of one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSpec {
    pub min_hz: f64,
    pub max_hz: f64,
    pub center_hz: f64,
    pub num_waves: usize,
}

impl WaveSpec {
    #[must_use]
    pub const fn for_band(band: Band) -> Self {
        let (min_hz, max_hz) = band.range_hz();
        let (center_hz, num_waves) = match band {
            Band::Delta => (DELTA_MIDPOINT_HZ, 7),
            Band::Theta => (THETA_MIDPOINT_HZ, 5),
            Band::Alpha => (ALPHA_MIDPOINT_HZ, 4),
            Band::Beta => (BETA_MIDPOINT_HZ, 3),
            Band::Gamma => (GAMMA_WIDE_MIDPOINT_HZ, 2),
        };
        Self { min_hz, max_hz, center_hz, num_waves }
    }

    fn max_distance_from_center(&self) -> f64 {
        (self.center_hz - self.min_hz).max(self.max_hz - self.center_hz)
    }

    /// Harmonic components, lowest first.
    #[must_use]
    pub fn components(&self) -> Vec<WaveComponent> {
        let max_distance = self.max_distance_from_center();
        (0..self.num_waves)
            .map(|i| {
                let position = (i + 1) as f64 / (self.num_waves + 2) as f64;
                let freq = self.min_hz + (self.max_hz - self.min_hz) * position;
                let weight = if max_distance > 0.0 {
                    1.0 - 0.3 * ((freq - self.center_hz).abs() / max_distance)
                } else {
                    1.0
                };
                WaveComponent {
                    freq: freq / VISUAL_FREQUENCY_DIVISOR,
                    amplitude: weight,
                    phase: i as f64 + position * TAU,
                }
            })
            .collect()
    }
}

/// Real band frequencies are divided by this before plotting.
const VISUAL_FREQUENCY_DIVISOR: f64 = 20.0;

/// One sine term. `freq` is already scaled for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    pub freq: f64,
    pub amplitude: f64,
    pub phase: f64,
}

impl WaveComponent {
    #[must_use]
    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * (t * self.freq + self.phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_counts() {
        assert_eq!(WaveSpec::for_band(Band::Delta).components().len(), 7);
        assert_eq!(WaveSpec::for_band(Band::Gamma).components().len(), 2);
    }

    #[test]
    fn test_gamma_components() {
        let c = WaveSpec::for_band(Band::Gamma).components();
        // positions 1/4 and 2/4 of 30..100 Hz
        assert!((c[0].freq - 47.5 / 20.0).abs() < 1e-12);
        assert!((c[1].freq - 65.0 / 20.0).abs() < 1e-12);
        // 17.5 Hz off a 35 Hz half-width -> 15% attenuation
        assert!((c[0].amplitude - 0.85).abs() < 1e-12);
        assert!((c[1].amplitude - 1.0).abs() < 1e-12);
        assert!((c[0].phase - 0.25 * TAU).abs() < 1e-12);
        assert!((c[1].phase - (1.0 + 0.5 * TAU)).abs() < 1e-12);
    }

    #[test]
    fn test_weights_stay_within_attenuation_bound() {
        for band in Band::ALL {
            for c in WaveSpec::for_band(band).components() {
                assert!((0.7..=1.0).contains(&c.amplitude), "{band}: {}", c.amplitude);
            }
        }
    }
}
