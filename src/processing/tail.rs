//! Synchronized tail deduplication.
//!
//! When a headband stops producing fresh frames the upstream service keeps
//! echoing the last one. That shows up as a run of identical trailing
//! samples on *every* channel at once. Only lockstep repeats are removed, so
//! a genuinely flat single channel survives.

use std::collections::BTreeMap;

use crate::types::SeriesValue;

/// Number of trailing samples repeated in lockstep across all `series`.
///
/// Scans from the end of the shortest sequence towards the front, counting
/// positions where every sequence has `seq[i] == seq[i - 1]`, and stops at the
/// first position where any sequence differs.
#[must_use]
pub fn synchronized_tail_len<S: AsRef<[f64]>>(series: &[S]) -> usize {
    let Some(min_len) = series.iter().map(|s| s.as_ref().len()).min() else {
        return 0;
    };
    if min_len <= 1 {
        return 0;
    }

    let mut trim = 0;
    for i in (1..min_len).rev() {
        #[allow(clippy::float_cmp)]
        let repeated = series.iter().all(|s| {
            let s = s.as_ref();
            s[i] == s[i - 1]
        });
        if !repeated {
            break;
        }
        trim += 1;
    }
    trim
}

/// Remove the synchronized repeated tail from every sequence in the map.
///
/// The map is returned unchanged when it is empty or when any value is a
/// scalar rather than a sequence.
#[must_use]
pub fn remove_synchronized_tail(
    series: &BTreeMap<String, SeriesValue>,
) -> BTreeMap<String, SeriesValue> {
    let sequences: Option<Vec<&[f64]>> = series
        .values()
        .map(|v| match v {
            SeriesValue::Samples(s) => Some(s.as_slice()),
            SeriesValue::Scalar(_) => None,
        })
        .collect();
    let Some(sequences) = sequences else {
        return series.clone();
    };

    let trim = synchronized_tail_len(&sequences);
    if trim == 0 {
        return series.clone();
    }

    series
        .iter()
        .map(|(name, value)| {
            let trimmed = match value {
                SeriesValue::Samples(s) => SeriesValue::Samples(truncate_tail(s, trim).to_vec()),
                SeriesValue::Scalar(v) => SeriesValue::Scalar(*v),
            };
            (name.clone(), trimmed)
        })
        .collect()
}

/// Drop `count` samples from the end of `values`.
#[must_use]
pub fn truncate_tail(values: &[f64], count: usize) -> &[f64] {
    &values[..values.len().saturating_sub(count)]
}
