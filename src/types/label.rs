//! Classification outputs: activeness buckets, ML states and the closed set
//! of pattern labels that key the fortune bank.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Band;

/// Dominant bucket of the per-slice activeness ratio.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivenessState {
    Active,
    Clear,
    Meditation,
    /// No bucket holds a large enough majority.
    Generic,
}

impl ActivenessState {
    pub const ALL: [ActivenessState; 4] = [Self::Active, Self::Clear, Self::Meditation, Self::Generic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Clear => "clear",
            Self::Meditation => "meditation",
            Self::Generic => "generic",
        }
    }
}

/// ML-derived states checked first by the ML-priority policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MlState {
    Focus,
    Clear,
    Meditation,
    Dream,
}

impl MlState {
    pub const ALL: [MlState; 4] = [Self::Focus, Self::Clear, Self::Meditation, Self::Dream];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Clear => "clear",
            Self::Meditation => "meditation",
            Self::Dream => "dream",
        }
    }
}

/// Dominant-pattern label.
///
/// Serialized as its string key: `alpha_active`, `high_beta`,
/// `high_focus`, `balanced`, ...
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternLabel {
    /// No band dominates.
    Balanced,
    /// Activeness-aware policy: `{band}_{state}`.
    Banded { band: Band, state: ActivenessState },
    /// ML-priority policy, band fallback: `high_{band}`.
    HighBand(Band),
    /// ML-priority policy, ML state over its cutoff: `high_{state}`.
    HighState(MlState),
}

impl PatternLabel {
    /// The fortune-bank key for this label.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Balanced => "balanced".to_string(),
            Self::Banded { band, state } => format!("{}_{}", band.as_str(), state.as_str()),
            Self::HighBand(band) => format!("high_{}", band.as_str()),
            Self::HighState(state) => format!("high_{}", state.as_str()),
        }
    }

    /// Primary band, when the label names one.
    #[must_use]
    pub const fn band(&self) -> Option<Band> {
        match self {
            Self::Banded { band, .. } | Self::HighBand(band) => Some(*band),
            Self::Balanced | Self::HighState(_) => None,
        }
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for PatternLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "balanced" {
            return Ok(Self::Balanced);
        }
        if let Some(rest) = s.strip_prefix("high_") {
            if let Ok(band) = rest.parse::<Band>() {
                return Ok(Self::HighBand(band));
            }
            if let Some(state) = MlState::ALL.into_iter().find(|m| m.as_str() == rest) {
                return Ok(Self::HighState(state));
            }
            return Err(format!("unknown label '{s}'"));
        }
        let (band, state) = s
            .split_once('_')
            .ok_or_else(|| format!("unknown label '{s}'"))?;
        let band = band.parse::<Band>()?;
        let state = ActivenessState::ALL
            .into_iter()
            .find(|a| a.as_str() == state)
            .ok_or_else(|| format!("unknown label '{s}'"))?;
        Ok(Self::Banded { band, state })
    }
}

impl Serialize for PatternLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for PatternLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
