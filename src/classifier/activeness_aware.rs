//! Activeness-aware classification: weighted dominant band plus activeness state.

use super::{activeness_state, dominant_band, ClassifierInput, PatternPolicy};
use crate::config::{ClassifierConfig, FortuneConfig};
use crate::processing::{weighted_normalize, RepresentativeFrequencies};
use crate::types::{ActivenessState, PatternLabel};

#[derive(Debug, Clone)]
pub struct ActivenessAwarePolicy {
    thresholds: ClassifierConfig,
    frequencies: RepresentativeFrequencies,
    exponent: f64,
}

impl ActivenessAwarePolicy {
    #[must_use]
    pub const fn new(
        thresholds: ClassifierConfig,
        frequencies: RepresentativeFrequencies,
        exponent: f64,
    ) -> Self {
        Self { thresholds, frequencies, exponent }
    }

    #[must_use]
    pub fn from_config(config: &FortuneConfig) -> Self {
        Self::new(
            config.classifier,
            config.weighting.classifier,
            config.weighting.classifier_exponent,
        )
    }
}

impl PatternPolicy for ActivenessAwarePolicy {
    fn name(&self) -> &str {
        "activeness_aware"
    }

    fn classify(&self, input: &ClassifierInput<'_>) -> PatternLabel {
        let weighted = weighted_normalize(input.bands, &self.frequencies, self.exponent);
        let Some(band) = dominant_band(&weighted, self.thresholds.dominant_cutoff) else {
            return PatternLabel::Balanced;
        };
        let state = activeness_state(input.activeness, &self.thresholds)
            .unwrap_or(ActivenessState::Generic);
        PatternLabel::Banded { band, state }
    }
}
