//! Deterministic numeric transforms over band data.
//!
//! - `tail`: synchronized tail deduplication
//! - `normalize`: plain and frequency-weighted proportions
//! - `timeline`: chart axis labels and per-slice percentages

pub mod normalize;
pub mod tail;
pub mod timeline;

pub use normalize::{normalize, weighted_normalize, RepresentativeFrequencies, DEFAULT_WEIGHTING_POWER};
pub use tail::{remove_synchronized_tail, synchronized_tail_len, truncate_tail};
pub use timeline::{band_percent_series, time_label, time_labels};
