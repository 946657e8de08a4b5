//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::FortuneConfig;
use crate::types::Band;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `FortuneConfig`.
///
/// Any new field added to `FortuneConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [api]
        "api",
        "api.endpoint",
        "api.timeout_secs",
        // [server]
        "server",
        "server.addr",
        // [policy]
        "policy",
        "policy.classifier",
        "policy.waveform",
        // [classifier]
        "classifier",
        "classifier.dominant_cutoff",
        "classifier.simple_band_cutoff",
        "classifier.focus_cutoff",
        "classifier.clear_cutoff",
        "classifier.meditation_cutoff",
        "classifier.dream_cutoff",
        "classifier.active_threshold",
        "classifier.meditation_threshold",
        "classifier.state_majority",
        // [weighting]
        "weighting",
        "weighting.display_exponent",
        "weighting.classifier_exponent",
        "weighting.display",
        "weighting.display.delta",
        "weighting.display.theta",
        "weighting.display.alpha",
        "weighting.display.beta",
        "weighting.display.gamma",
        "weighting.classifier",
        "weighting.classifier.delta",
        "weighting.classifier.theta",
        "weighting.classifier.alpha",
        "weighting.classifier.beta",
        "weighting.classifier.gamma",
        // [waveform]
        "waveform",
        "waveform.width",
        "waveform.height",
        "waveform.amplitude_floor",
        // [page]
        "page",
        "page.headband_min",
        "page.headband_max",
        "page.fortune_delay_ms",
        "page.seconds_per_sample",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are stable across runs
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");

    let mut warnings: Vec<ValidationWarning> = found
        .iter()
        .filter(|key| !known.contains(key.as_str()))
        // Only report the outermost unknown table, not every child under it
        .filter(|key| {
            key.rsplit_once('.')
                .map_or(true, |(parent, _)| known.contains(parent))
        })
        .map(|key| ValidationWarning {
            field: key.clone(),
            message: format!("Unknown config key '{key}'"),
            suggestion: suggest_correction(key, &known),
        })
        .collect();
    warnings.sort_by(|a, b| a.field.cmp(&b.field));
    warnings
}

// ============================================================================
// Range Validation
// ============================================================================

/// Check every numeric setting for range and ordering. Returns one message
/// per violated rule.
pub fn validate_ranges(config: &FortuneConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let c = &config.classifier;

    for (name, value) in [
        ("classifier.dominant_cutoff", c.dominant_cutoff),
        ("classifier.simple_band_cutoff", c.simple_band_cutoff),
        ("classifier.active_threshold", c.active_threshold),
        ("classifier.meditation_threshold", c.meditation_threshold),
        ("classifier.state_majority", c.state_majority),
    ] {
        check_unit_interval(name, value, &mut errors);
    }

    // ML averages are unbounded above, so only positivity is required
    for (name, value) in [
        ("classifier.focus_cutoff", c.focus_cutoff),
        ("classifier.clear_cutoff", c.clear_cutoff),
        ("classifier.meditation_cutoff", c.meditation_cutoff),
        ("classifier.dream_cutoff", c.dream_cutoff),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a positive finite number (got {value})"));
        }
    }

    if c.meditation_threshold >= c.active_threshold {
        errors.push(format!(
            "classifier.meditation_threshold ({:.3}) must be less than active_threshold ({:.3})",
            c.meditation_threshold, c.active_threshold
        ));
    }

    let w = &config.weighting;
    for (name, value) in [
        ("weighting.display_exponent", w.display_exponent),
        ("weighting.classifier_exponent", w.classifier_exponent),
    ] {
        if !value.is_finite() {
            errors.push(format!("{name} must be finite (got {value})"));
        }
    }
    for (table, freqs) in [("weighting.display", &w.display), ("weighting.classifier", &w.classifier)] {
        for band in Band::ALL {
            let hz = freqs.get(band);
            if !hz.is_finite() || hz <= 0.0 {
                errors.push(format!("{table}.{band} must be a positive frequency in Hz (got {hz})"));
            }
        }
    }

    let wf = &config.waveform;
    if wf.width < 2 || wf.height < 2 {
        errors.push(format!(
            "waveform dimensions must be at least 2x2 (got {}x{})",
            wf.width, wf.height
        ));
    }
    check_unit_interval("waveform.amplitude_floor", wf.amplitude_floor, &mut errors);

    let p = &config.page;
    if p.headband_min > p.headband_max {
        errors.push(format!(
            "page.headband_min ({}) must not exceed headband_max ({})",
            p.headband_min, p.headband_max
        ));
    }
    if p.seconds_per_sample == 0 {
        errors.push("page.seconds_per_sample must be > 0".to_string());
    }

    if config.api.endpoint.trim().is_empty() {
        errors.push("api.endpoint must not be empty".to_string());
    }

    errors
}

fn check_unit_interval(name: &str, value: f64, errors: &mut Vec<String>) {
    // NaN comparisons silently pass; catch them explicitly
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        errors.push(format!("{name} must lie strictly between 0 and 1 (got {value})"));
    }
}
