//! Activeness bucketing.

use crate::config::ClassifierConfig;
use crate::types::ActivenessState;

/// Bucket one activeness value.
fn bucket(value: f64, thresholds: &ClassifierConfig) -> ActivenessState {
    if value >= thresholds.active_threshold {
        ActivenessState::Active
    } else if value >= thresholds.meditation_threshold {
        ActivenessState::Clear
    } else {
        ActivenessState::Meditation
    }
}

/// Dominant activeness state over a run of slices.
///
/// Returns `None` for an empty run (no activeness data at all). Otherwise the
/// bucket holding at least `state_majority` of the slices, or
/// [`ActivenessState::Generic`] when none does.
#[must_use]
pub fn activeness_state(values: &[f64], thresholds: &ClassifierConfig) -> Option<ActivenessState> {
    if values.is_empty() {
        return None;
    }

    let (mut active, mut clear, mut meditation) = (0_usize, 0_usize, 0_usize);
    for &v in values {
        match bucket(v, thresholds) {
            ActivenessState::Active => active += 1,
            ActivenessState::Clear => clear += 1,
            _ => meditation += 1,
        }
    }

    let total = values.len() as f64;
    let state = [
        (ActivenessState::Active, active),
        (ActivenessState::Clear, clear),
        (ActivenessState::Meditation, meditation),
    ]
    .into_iter()
    .find(|&(_, count)| count as f64 / total >= thresholds.state_majority)
    .map_or(ActivenessState::Generic, |(state, _)| state);

    Some(state)
}
