//! Decorative waveform previews
//!
//! Each band gets a small multi-sine sketch. Only the amplitude comes from
//! the reading; the shape is fixed per band so a given band and amplitude
//! always draw the same wiggle.

mod components;
mod svg;

pub use components::{WaveComponent, WaveSpec};
pub use svg::{flat_line, svg_path};

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::WaveformConfig;
use crate::types::{Band, BandSample};

/// Time span covered by one preview, in radians.
const TIME_SPAN: f64 = 8.0 * PI;

/// DC handling for synthesized samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformPolicy {
    /// Subtract the mean of all raw samples before centering.
    #[default]
    Debiased,
    /// Center the raw sum as-is.
    Raw,
}

/// One plotted point; `x` is the pixel column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WavePoint {
    pub x: u32,
    pub y: f64,
}

/// Synthesize `width` points for `band`.
///
/// Every `y` is clamped into `[1, height - 1]`.
#[must_use]
pub fn synthesize(
    band: Band,
    amplitude: f64,
    width: u32,
    height: u32,
    policy: WaveformPolicy,
) -> Vec<WavePoint> {
    let components = WaveSpec::for_band(band).components();
    let w = f64::from(width);

    let mut raw: Vec<f64> = (0..width)
        .map(|x| {
            let t = f64::from(x) / w * TIME_SPAN;
            components.iter().map(|c| c.sample(t)).sum::<f64>() * amplitude
        })
        .collect();

    if policy == WaveformPolicy::Debiased && !raw.is_empty() {
        let bias = raw.iter().sum::<f64>() / raw.len() as f64;
        for v in &mut raw {
            *v -= bias;
        }
    }

    let h = f64::from(height);
    let mid = h / 2.0;
    let scale = h / 3.0;
    raw.into_iter()
        .zip(0..width)
        .map(|(v, x)| WavePoint { x, y: (mid - v * scale).max(1.0).min(h - 1.0) })
        .collect()
}

/// [`synthesize`] by band name; unknown names draw a flat centre line.
#[must_use]
pub fn synthesize_by_name(
    name: &str,
    amplitude: f64,
    width: u32,
    height: u32,
    policy: WaveformPolicy,
) -> Vec<WavePoint> {
    match Band::from_str(name) {
        Ok(band) => synthesize(band, amplitude, width, height, policy),
        Err(_) => flat_line(width, height),
    }
}

/// Per-band preview amplitude from display percentages.
///
/// The strongest band draws at full height and the rest scale down toward
/// `floor`. All-zero (or non-finite) input draws every band at `floor`.
#[must_use]
pub fn band_amplitudes(percentages: &BandSample, floor: f64) -> BandSample {
    let max = percentages.max_value();
    if !(max.is_finite() && max > 0.0) {
        return BandSample::from_fn(|_| floor);
    }
    BandSample::from_fn(|band| floor + (1.0 - floor) * percentages.get(band) / max)
}

/// SVG path for every band, drawn with the configured size and DC policy.
#[must_use]
pub fn band_paths(
    percentages: &BandSample,
    config: &WaveformConfig,
    policy: WaveformPolicy,
) -> Vec<(Band, String)> {
    let amplitudes = band_amplitudes(percentages, config.amplitude_floor);
    Band::ALL
        .into_iter()
        .map(|band| {
            let points =
                synthesize(band, amplitudes.get(band), config.width, config.height, policy);
            (band, svg_path(&points))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_point_count_and_bounds() {
        for policy in [WaveformPolicy::Debiased, WaveformPolicy::Raw] {
            let points = synthesize(Band::Gamma, 1.0, 80, 60, policy);
            assert_eq!(points.len(), 80);
            for (i, p) in points.iter().enumerate() {
                assert_eq!(p.x as usize, i);
                assert!((1.0..=59.0).contains(&p.y), "y={} at x={}", p.y, p.x);
            }
        }
    }

    #[test]
    fn test_zero_amplitude_is_centered() {
        let points = synthesize(Band::Alpha, 0.0, 10, 60, WaveformPolicy::Raw);
        assert!(points.iter().all(|p| (p.y - 30.0).abs() < 1e-12));
    }

    #[test]
    fn test_large_amplitude_is_clamped() {
        let points = synthesize(Band::Delta, 50.0, 80, 60, WaveformPolicy::Raw);
        assert!(points.iter().any(|p| p.y == 1.0 || p.y == 59.0));
        assert!(points.iter().all(|p| (1.0..=59.0).contains(&p.y)));
    }

    #[test]
    fn test_debiased_mean_sits_on_center() {
        // Small amplitude keeps every sample away from the clamp.
        let points = synthesize(Band::Theta, 0.1, 80, 60, WaveformPolicy::Debiased);
        let mean = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
        assert!((mean - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_policies_differ_only_by_offset() {
        let raw = synthesize(Band::Beta, 0.1, 80, 60, WaveformPolicy::Raw);
        let debiased = synthesize(Band::Beta, 0.1, 80, 60, WaveformPolicy::Debiased);
        let offset = raw[0].y - debiased[0].y;
        for (r, d) in raw.iter().zip(&debiased) {
            assert!((r.y - d.y - offset).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = synthesize(Band::Gamma, 0.7, 80, 60, WaveformPolicy::Debiased);
        let b = synthesize(Band::Gamma, 0.7, 80, 60, WaveformPolicy::Debiased);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_band_is_flat_line() {
        let points = synthesize_by_name("kappa", 1.0, 80, 60, WaveformPolicy::Debiased);
        assert_eq!(points, vec![WavePoint { x: 0, y: 30.0 }, WavePoint { x: 80, y: 30.0 }]);
        assert_eq!(synthesize_by_name("gamma", 1.0, 80, 60, WaveformPolicy::Debiased).len(), 80);
    }

    #[test]
    fn test_band_amplitudes() {
        let p = BandSample { delta: 10.0, theta: 20.0, alpha: 40.0, beta: 20.0, gamma: 10.0 };
        let a = band_amplitudes(&p, 0.25);
        assert!((a.alpha - 1.0).abs() < 1e-12);
        assert!((a.theta - 0.625).abs() < 1e-12);
        assert!((a.delta - 0.4375).abs() < 1e-12);

        let zero = band_amplitudes(&BandSample::default(), 0.25);
        assert_eq!(zero, BandSample::new(0.25, 0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn test_band_paths_cover_every_band() {
        let p = BandSample::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let paths = band_paths(&p, &WaveformConfig::default(), WaveformPolicy::Debiased);
        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|(_, d)| d.starts_with("M 0,")));
    }
}
