//! Chart axis labels and per-slice band percentage series.

use std::collections::BTreeMap;

use super::normalize::{weighted_normalize, RepresentativeFrequencies};
use crate::types::{Band, BandSeries};

/// Elapsed-time label for slice `index`: `"{n}s"` under a minute,
/// `"{m}m {s}s"` from then on.
#[must_use]
pub fn time_label(index: usize, seconds_per_sample: u32) -> String {
    let elapsed = index as u64 * u64::from(seconds_per_sample);
    if elapsed < 60 {
        format!("{elapsed}s")
    } else {
        format!("{}m {}s", elapsed / 60, elapsed % 60)
    }
}

/// Labels for `count` consecutive slices.
#[must_use]
pub fn time_labels(count: usize, seconds_per_sample: u32) -> Vec<String> {
    (0..count).map(|i| time_label(i, seconds_per_sample)).collect()
}

/// Weighted band percentages (0-100) for every slice of `series`.
#[must_use]
pub fn band_percent_series(
    series: &BandSeries,
    freqs: &RepresentativeFrequencies,
    exponent: f64,
) -> BTreeMap<Band, Vec<f64>> {
    let mut out: BTreeMap<Band, Vec<f64>> =
        Band::ALL.into_iter().map(|b| (b, Vec::with_capacity(series.len()))).collect();

    for sample in (0..series.len()).filter_map(|i| series.sample(i)) {
        let weighted = weighted_normalize(&sample, freqs, exponent);
        for band in Band::ALL {
            if let Some(values) = out.get_mut(&band) {
                values.push(weighted.get(band) * 100.0);
            }
        }
    }
    out
}
