//! Brainwave Fortune
//!
//! Turns a short series of EEG band powers into a dominant-pattern label, a
//! deterministic fortune-cookie message, and decorative waveform previews.
//!
//! ## Architecture
//!
//! - **Identifier**: obfuscated `(headband, run)` / timestamp URL tokens
//! - **Processing**: tail deduplication, plain and frequency-weighted normalization
//! - **Classifier**: activeness-aware and ML-priority pattern policies
//! - **Fortune**: ordered message bank and seeded selection
//! - **Waveform**: multi-sine preview synthesis and SVG paths
//! - **Pipeline**: fetch once, derive, report (with fallbacks)
//! - **API**: JSON over HTTP for the page

pub mod config;
pub mod types;
pub mod identifier;
pub mod processing;
pub mod classifier;
pub mod fortune;
pub mod waveform;
pub mod client;
pub mod pipeline;
pub mod api;

pub use config::FortuneConfig;

pub use types::{
    ActivenessState, Band, BandSample, BandSeries, FortuneReport, MlAnalysis, MlState,
    PatternLabel, ReportMode, SeriesValue,
};

pub use identifier::{decode, encode_data, encode_fortune, Identifier, PageQuery, PageRequest};

pub use processing::{normalize, remove_synchronized_tail, weighted_normalize};

pub use classifier::{ClassifierInput, ClassifierPolicy, PatternPolicy};

pub use fortune::{fortune_for_timestamp, select_fortune};

pub use waveform::{svg_path, synthesize, synthesize_by_name, WavePoint, WaveformPolicy};

pub use client::{BrainwaveClient, ClientError, ReadingSource};

pub use pipeline::FortunePipeline;
