//! Fortune Configuration - every tunable cutoff, weighting and endpoint as TOML
//!
//! Each struct implements `Default` with the production constants, so the
//! service behaves identically when no config file is present.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::classifier::ClassifierPolicy;
use crate::processing::{RepresentativeFrequencies, DEFAULT_WEIGHTING_POWER};
use crate::waveform::WaveformPolicy;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "FORTUNE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "fortune_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `FortuneConfig::load()` which searches:
/// 1. `$FORTUNE_CONFIG` env var
/// 2. `./fortune_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FortuneConfig {
    /// Remote band API
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Which classifier and waveform variants are active
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Classification cutoffs
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Representative frequencies and exponents
    #[serde(default)]
    pub weighting: WeightingConfig,

    /// Waveform preview geometry
    #[serde(default)]
    pub waveform: WaveformConfig,

    /// Page behaviour
    #[serde(default)]
    pub page: PageConfig,
}

impl FortuneConfig {
    /// Load configuration using the standard search order:
    /// 1. `$FORTUNE_CONFIG` environment variable
    /// 2. `./fortune_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded fortune config from FORTUNE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from FORTUNE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "FORTUNE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./fortune_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded fortune config from ./fortune_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./fortune_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No fortune_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Two-pass: check for unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate cutoffs, thresholds and geometry for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = super::validation::validate_ranges(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// API
// ============================================================================

/// Remote band API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL receiving `POST {"headband": .., "run": ..}`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout. Absent means the request may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    defaults::API_ENDPOINT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_server_addr() }
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Selects between the two page variants' behaviours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub classifier: ClassifierPolicy,
    #[serde(default)]
    pub waveform: WaveformPolicy,
}

// ============================================================================
// Classifier
// ============================================================================

/// Cutoffs for both classifier policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Weighted proportion a band must exceed to dominate (activeness-aware)
    #[serde(default = "default_dominant_cutoff")]
    pub dominant_cutoff: f64,

    /// Plain proportion a band must exceed to dominate (ML-priority)
    #[serde(default = "default_simple_band_cutoff")]
    pub simple_band_cutoff: f64,

    #[serde(default = "default_ml_cutoff")]
    pub focus_cutoff: f64,

    #[serde(default = "default_ml_cutoff")]
    pub clear_cutoff: f64,

    #[serde(default = "default_meditation_cutoff")]
    pub meditation_cutoff: f64,

    #[serde(default = "default_ml_cutoff")]
    pub dream_cutoff: f64,

    /// Activeness at or above this is "active"
    #[serde(default = "default_active_threshold")]
    pub active_threshold: f64,

    /// Activeness below this is "meditation"; in between is "clear"
    #[serde(default = "default_meditation_threshold")]
    pub meditation_threshold: f64,

    /// Fraction of slices one bucket needs to set the activeness state
    #[serde(default = "default_state_majority")]
    pub state_majority: f64,
}

fn default_dominant_cutoff() -> f64 { 0.225 }
fn default_simple_band_cutoff() -> f64 { 0.25 }
fn default_ml_cutoff() -> f64 { 0.7 }
fn default_meditation_cutoff() -> f64 { 0.6 }
fn default_active_threshold() -> f64 { 2.0 / 3.0 }
fn default_meditation_threshold() -> f64 { 1.0 / 3.0 }
fn default_state_majority() -> f64 { 2.0 / 3.0 }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            dominant_cutoff: default_dominant_cutoff(),
            simple_band_cutoff: default_simple_band_cutoff(),
            focus_cutoff: default_ml_cutoff(),
            clear_cutoff: default_ml_cutoff(),
            meditation_cutoff: default_meditation_cutoff(),
            dream_cutoff: default_ml_cutoff(),
            active_threshold: default_active_threshold(),
            meditation_threshold: default_meditation_threshold(),
            state_majority: default_state_majority(),
        }
    }
}

// ============================================================================
// Weighting
// ============================================================================

/// Frequency weighting for the two call sites: displayed percentages and
/// the classifier's dominance check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightingConfig {
    #[serde(default = "default_exponent")]
    pub display_exponent: f64,

    #[serde(default = "default_exponent")]
    pub classifier_exponent: f64,

    /// Bands left out of the table keep their display preset.
    #[serde(
        default = "default_display_frequencies",
        deserialize_with = "display_frequencies"
    )]
    pub display: RepresentativeFrequencies,

    /// Bands left out of the table keep their classifier preset.
    #[serde(
        default = "default_classifier_frequencies",
        deserialize_with = "classifier_frequencies"
    )]
    pub classifier: RepresentativeFrequencies,
}

fn default_exponent() -> f64 { DEFAULT_WEIGHTING_POWER }
fn default_display_frequencies() -> RepresentativeFrequencies { RepresentativeFrequencies::DISPLAY }
fn default_classifier_frequencies() -> RepresentativeFrequencies { RepresentativeFrequencies::CLASSIFIER }

/// A `[weighting.*]` table where every band is optional.
#[derive(Debug, Default, Deserialize)]
struct FrequencyOverrides {
    delta: Option<f64>,
    theta: Option<f64>,
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
}

impl FrequencyOverrides {
    fn apply_to(self, preset: RepresentativeFrequencies) -> RepresentativeFrequencies {
        RepresentativeFrequencies {
            delta: self.delta.unwrap_or(preset.delta),
            theta: self.theta.unwrap_or(preset.theta),
            alpha: self.alpha.unwrap_or(preset.alpha),
            beta: self.beta.unwrap_or(preset.beta),
            gamma: self.gamma.unwrap_or(preset.gamma),
        }
    }
}

fn display_frequencies<'de, D>(deserializer: D) -> Result<RepresentativeFrequencies, D::Error>
where
    D: Deserializer<'de>,
{
    FrequencyOverrides::deserialize(deserializer)
        .map(|o| o.apply_to(RepresentativeFrequencies::DISPLAY))
}

fn classifier_frequencies<'de, D>(deserializer: D) -> Result<RepresentativeFrequencies, D::Error>
where
    D: Deserializer<'de>,
{
    FrequencyOverrides::deserialize(deserializer)
        .map(|o| o.apply_to(RepresentativeFrequencies::CLASSIFIER))
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            display_exponent: default_exponent(),
            classifier_exponent: default_exponent(),
            display: default_display_frequencies(),
            classifier: default_classifier_frequencies(),
        }
    }
}

// ============================================================================
// Waveform
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformConfig {
    /// Preview width in px (one sample per px)
    #[serde(default = "default_waveform_width")]
    pub width: u32,

    /// Preview height in px
    #[serde(default = "default_waveform_height")]
    pub height: u32,

    /// Amplitude given to the weakest band; the strongest band gets 1.0
    #[serde(default = "default_amplitude_floor")]
    pub amplitude_floor: f64,
}

fn default_waveform_width() -> u32 { defaults::WAVEFORM_WIDTH }
fn default_waveform_height() -> u32 { defaults::WAVEFORM_HEIGHT }
fn default_amplitude_floor() -> f64 { 0.25 }

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            width: default_waveform_width(),
            height: default_waveform_height(),
            amplitude_floor: default_amplitude_floor(),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub headband_min: i64,

    #[serde(default = "default_headband_max")]
    pub headband_max: i64,

    /// Delay before showing a timestamp fortune when no headband is given
    #[serde(default = "default_fortune_delay_ms")]
    pub fortune_delay_ms: u64,

    /// Duration of one band slice
    #[serde(default = "default_seconds_per_sample")]
    pub seconds_per_sample: u32,
}

fn default_headband_max() -> i64 { defaults::HEADBAND_MAX }
fn default_fortune_delay_ms() -> u64 { defaults::FORTUNE_DELAY_MS }
fn default_seconds_per_sample() -> u32 { defaults::SECONDS_PER_SAMPLE }

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            headband_min: 0,
            headband_max: default_headband_max(),
            fortune_delay_ms: default_fortune_delay_ms(),
            seconds_per_sample: default_seconds_per_sample(),
        }
    }
}

impl PageConfig {
    /// Accepted headband numbers.
    #[must_use]
    pub const fn headbands(&self) -> std::ops::RangeInclusive<i64> {
        self.headband_min..=self.headband_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(FortuneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: FortuneConfig = toml::from_str(
            r#"
[policy]
classifier = "ml_priority"

[classifier]
dominant_cutoff = 0.3
"#,
        )
        .unwrap();
        assert_eq!(config.policy.classifier, ClassifierPolicy::MlPriority);
        assert!((config.classifier.dominant_cutoff - 0.3).abs() < 1e-12);
        assert!((config.classifier.meditation_cutoff - 0.6).abs() < 1e-12);
        assert_eq!(config.page.headband_max, 10);
        assert_eq!(config.weighting.display, RepresentativeFrequencies::DISPLAY);
    }

    #[test]
    fn test_single_frequency_override_keeps_preset() {
        let config: FortuneConfig = toml::from_str("[weighting.display]\ngamma = 65.0\n").unwrap();
        let expected = RepresentativeFrequencies { gamma: 65.0, ..RepresentativeFrequencies::DISPLAY };
        assert_eq!(config.weighting.display, expected);
        assert_eq!(config.weighting.classifier, RepresentativeFrequencies::CLASSIFIER);

        let config: FortuneConfig = toml::from_str("[weighting.classifier]\ndelta = 1.5\n").unwrap();
        assert!((config.weighting.classifier.delta - 1.5).abs() < 1e-12);
        assert!((config.weighting.classifier.gamma - 30.0).abs() < 1e-12);
        assert_eq!(config.weighting.display, RepresentativeFrequencies::DISPLAY);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FortuneConfig::default();
        let s = config.to_toml().unwrap();
        let back: FortuneConfig = toml::from_str(&s).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_from_file_rejects_bad_cutoff() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fortune_config.toml");
        std::fs::write(&path, "[classifier]\ndominant_cutoff = 1.5\n").unwrap();
        let err = FortuneConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("dominant_cutoff"));
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let err = FortuneConfig::load_from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
