//! Dominant pattern classification
//!
//! Two page variants classify differently; both are kept as selectable
//! policies behind [`PatternPolicy`]:
//!
//! 1. **Activeness-aware** (default) - frequency-weighted band proportions,
//!    a 0.225 dominance cutoff, blended with the activeness state into
//!    `{band}_{state}` labels.
//! 2. **ML-priority** - ML state averages first (`high_focus`, ...), then
//!    plain band proportions over a 0.25 cutoff (`high_{band}`).
//!
//! Both fall back to `balanced` when nothing dominates.

mod activeness;
mod activeness_aware;
mod ml_priority;

pub use activeness::activeness_state;
pub use activeness_aware::ActivenessAwarePolicy;
pub use ml_priority::MlPriorityPolicy;

use serde::{Deserialize, Serialize};

use crate::config::FortuneConfig;
use crate::types::{Band, BandSample, MlAnalysis, PatternLabel};

/// Everything a policy may look at.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInput<'a> {
    /// Averaged raw band powers
    pub bands: &'a BandSample,
    pub ml: &'a MlAnalysis,
    /// Per-slice activeness; empty when the source sent none
    pub activeness: &'a [f64],
}

/// A classification strategy.
pub trait PatternPolicy: Send + Sync {
    /// Policy name for logging
    fn name(&self) -> &str;

    fn classify(&self, input: &ClassifierInput<'_>) -> PatternLabel;
}

/// Configured policy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierPolicy {
    #[default]
    ActivenessAware,
    MlPriority,
}

impl ClassifierPolicy {
    /// Build the policy with cutoffs and weighting taken from `config`.
    #[must_use]
    pub fn build(self, config: &FortuneConfig) -> Box<dyn PatternPolicy> {
        match self {
            Self::ActivenessAware => Box::new(ActivenessAwarePolicy::from_config(config)),
            Self::MlPriority => Box::new(MlPriorityPolicy::from_config(config)),
        }
    }
}

/// Band with the largest proportion, if it strictly exceeds `cutoff`.
///
/// Bands are compared in [`Band::DOMINANCE_ORDER`]; a later band must be
/// strictly larger to replace an earlier one, so ties go to the earlier band.
#[must_use]
pub fn dominant_band(proportions: &BandSample, cutoff: f64) -> Option<Band> {
    let mut best = Band::DOMINANCE_ORDER[0];
    let mut best_value = proportions.get(best);
    for band in &Band::DOMINANCE_ORDER[1..] {
        let value = proportions.get(*band);
        if value > best_value {
            best = *band;
            best_value = value;
        }
    }
    (best_value > cutoff).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_strict() {
        let at = BandSample { alpha: 0.225, beta: 0.2, gamma: 0.2, theta: 0.2, delta: 0.175 };
        assert_eq!(dominant_band(&at, 0.225), None);

        let above = BandSample { alpha: 0.2251, beta: 0.2, gamma: 0.2, theta: 0.2, delta: 0.1749 };
        assert_eq!(dominant_band(&above, 0.225), Some(Band::Alpha));
    }

    #[test]
    fn test_ties_favor_dominance_order() {
        let tie = BandSample { alpha: 0.3, beta: 0.3, gamma: 0.1, theta: 0.1, delta: 0.2 };
        assert_eq!(dominant_band(&tie, 0.225), Some(Band::Alpha));

        let tie = BandSample { alpha: 0.1, beta: 0.1, gamma: 0.3, theta: 0.3, delta: 0.2 };
        assert_eq!(dominant_band(&tie, 0.225), Some(Band::Gamma));

        let tie = BandSample { alpha: 0.1, beta: 0.1, gamma: 0.1, theta: 0.35, delta: 0.35 };
        assert_eq!(dominant_band(&tie, 0.225), Some(Band::Theta));
    }

    #[test]
    fn test_policy_names() {
        let config = FortuneConfig::default();
        assert_eq!(ClassifierPolicy::ActivenessAware.build(&config).name(), "activeness_aware");
        assert_eq!(ClassifierPolicy::MlPriority.build(&config).name(), "ml_priority");
    }
}
