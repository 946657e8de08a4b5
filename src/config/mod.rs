//! Fortune Configuration Module
//!
//! Provides configuration loaded from TOML files, replacing hardcoded
//! cutoffs, weightings and endpoints with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `FORTUNE_CONFIG` environment variable (path to TOML file)
//! 2. `fortune_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! The binary loads one `FortuneConfig` at startup and hands it to the
//! pipeline, which owns it from then on.
//!
//! ```ignore
//! let config = FortuneConfig::load();
//! let cutoff = config.classifier.dominant_cutoff;
//! ```

mod fortune_config;
pub mod defaults;
pub mod validation;

pub use fortune_config::*;
