//! Shared data structures for the brainwave fortune pipeline
//!
//! - Bands: `Band`, `BandSample`, `BandSeries`, `SeriesValue`, `MlAnalysis`
//! - Labels: `ActivenessState`, `MlState`, `PatternLabel`
//! - Report: `FortuneReport` and its display fields

mod bands;
mod label;
mod report;

pub use bands::*;
pub use label::*;
pub use report::*;
