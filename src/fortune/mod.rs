//! Fortune selection
//!
//! Two deterministic paths pick a message:
//!
//! - **Data mode**: the label chooses a category, a seed computed from the
//!   plain band proportions and the meditation average chooses the message.
//! - **Fortune mode**: the page-load timestamp indexes the whole bank,
//!   flattened in declared category order.
//!
//! Neither path uses randomness; equal inputs always give the same message.

mod bank;

pub use bank::{
    all_messages, messages_for, total_messages, FortuneCategory, APOLOGY_FORTUNE, BALANCED_KEY,
    FORTUNE_BANK,
};

use crate::processing::normalize;
use crate::types::{BandSample, MlAnalysis, PatternLabel};

// ============================================================================
// Seed weights
// ============================================================================

const ALPHA_WEIGHT: f64 = 1000.0;
const BETA_WEIGHT: f64 = 2000.0;
const GAMMA_WEIGHT: f64 = 3000.0;
const DELTA_WEIGHT: f64 = 4000.0;
const THETA_WEIGHT: f64 = 5000.0;
// focus, clear and dream are deliberately left out of the seed.
const MEDITATION_WEIGHT: f64 = 8000.0;

/// Selection seed from plain band proportions and the raw meditation average.
#[must_use]
pub fn fortune_seed(proportions: &BandSample, ml: &MlAnalysis) -> u64 {
    let seed = ALPHA_WEIGHT * proportions.alpha
        + BETA_WEIGHT * proportions.beta
        + GAMMA_WEIGHT * proportions.gamma
        + DELTA_WEIGHT * proportions.delta
        + THETA_WEIGHT * proportions.theta
        + MEDITATION_WEIGHT * ml.meditation;
    // Saturating cast: NaN maps to 0, negatives clamp to 0.
    seed.round() as u64
}

/// Pick the fortune for `label` from raw averaged band powers.
///
/// `bands` is normalized here; passing already-normalized proportions gives
/// the same result.
#[must_use]
pub fn select_fortune(label: &PatternLabel, bands: &BandSample, ml: &MlAnalysis) -> &'static str {
    let messages = messages_for(&label.key());
    if messages.is_empty() {
        return APOLOGY_FORTUNE;
    }
    let seed = fortune_seed(&normalize(bands), ml);
    messages[(seed % messages.len() as u64) as usize]
}

/// Fortune for a page with no headband data, keyed by an epoch timestamp.
#[must_use]
pub fn fortune_for_timestamp(timestamp: u64) -> &'static str {
    let total = total_messages() as u64;
    if total == 0 {
        return APOLOGY_FORTUNE;
    }
    all_messages()
        .nth((timestamp % total) as usize)
        .unwrap_or(APOLOGY_FORTUNE)
}
