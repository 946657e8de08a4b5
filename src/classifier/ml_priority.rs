//! ML-priority classification: ML state averages win over band dominance.

use super::{dominant_band, ClassifierInput, PatternPolicy};
use crate::config::{ClassifierConfig, FortuneConfig};
use crate::processing::normalize;
use crate::types::{MlAnalysis, MlState, PatternLabel};

#[derive(Debug, Clone)]
pub struct MlPriorityPolicy {
    thresholds: ClassifierConfig,
}

impl MlPriorityPolicy {
    #[must_use]
    pub const fn new(thresholds: ClassifierConfig) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub fn from_config(config: &FortuneConfig) -> Self {
        Self::new(config.classifier)
    }

    /// First ML state, in `focus, clear, meditation, dream` order, whose
    /// average strictly exceeds its cutoff.
    fn ml_state(&self, ml: &MlAnalysis) -> Option<MlState> {
        let t = &self.thresholds;
        [
            (MlState::Focus, ml.focus, t.focus_cutoff),
            (MlState::Clear, ml.clear, t.clear_cutoff),
            (MlState::Meditation, ml.meditation, t.meditation_cutoff),
            (MlState::Dream, ml.dream, t.dream_cutoff),
        ]
        .into_iter()
        .find(|&(_, value, cutoff)| value > cutoff)
        .map(|(state, _, _)| state)
    }
}

impl PatternPolicy for MlPriorityPolicy {
    fn name(&self) -> &str {
        "ml_priority"
    }

    fn classify(&self, input: &ClassifierInput<'_>) -> PatternLabel {
        if let Some(state) = self.ml_state(input.ml) {
            return PatternLabel::HighState(state);
        }
        let proportions = normalize(input.bands);
        dominant_band(&proportions, self.thresholds.simple_band_cutoff)
            .map_or(PatternLabel::Balanced, PatternLabel::HighBand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Band, BandSample};

    fn classify(bands: &BandSample, ml: &MlAnalysis) -> PatternLabel {
        MlPriorityPolicy::from_config(&FortuneConfig::default())
            .classify(&ClassifierInput { bands, ml, activeness: &[] })
    }

    fn even() -> BandSample {
        BandSample::new(1.0, 1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_ml_state_takes_priority() {
        let bands = BandSample { alpha: 10.0, ..BandSample::default() };
        let ml = MlAnalysis { focus: 0.71, ..MlAnalysis::default() };
        assert_eq!(classify(&bands, &ml), PatternLabel::HighState(MlState::Focus));
    }

    #[test]
    fn test_meditation_uses_lower_cutoff() {
        let ml = MlAnalysis { meditation: 0.65, ..MlAnalysis::default() };
        assert_eq!(classify(&even(), &ml), PatternLabel::HighState(MlState::Meditation));
        let ml = MlAnalysis { dream: 0.65, ..MlAnalysis::default() };
        assert_eq!(classify(&even(), &ml), PatternLabel::Balanced);
    }

    #[test]
    fn test_ml_check_order() {
        let ml = MlAnalysis { focus: 0.5, clear: 0.9, meditation: 0.9, dream: 5.0 };
        assert_eq!(classify(&even(), &ml), PatternLabel::HighState(MlState::Clear));
    }

    #[test]
    fn test_ml_cutoff_is_strict() {
        let ml = MlAnalysis { focus: 0.7, ..MlAnalysis::default() };
        assert_eq!(classify(&even(), &ml), PatternLabel::Balanced);
    }

    #[test]
    fn test_band_fallback_is_unweighted() {
        // Plain proportions: theta 0.3 > 0.25. Weighting would have favoured gamma.
        let bands = BandSample { delta: 0.2, theta: 0.3, alpha: 0.1, beta: 0.15, gamma: 0.25 };
        assert_eq!(classify(&bands, &MlAnalysis::default()), PatternLabel::HighBand(Band::Theta));
    }

    #[test]
    fn test_even_bands_are_balanced() {
        assert_eq!(classify(&even(), &MlAnalysis::default()), PatternLabel::Balanced);
    }
}
