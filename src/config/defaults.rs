//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Remote API
// ============================================================================

/// Band API endpoint used when no config overrides it.
pub const API_ENDPOINT: &str = "http://127.0.0.1:8000/api/brainwaves";

// ============================================================================
// HTTP Server
// ============================================================================

pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Origins allowed cross-origin access, comma-separated.
pub const CORS_ORIGINS_ENV_VAR: &str = "FORTUNE_CORS_ORIGINS";

// ============================================================================
// Page
// ============================================================================

/// Highest headband number; anything above shows a timestamp fortune.
pub const HEADBAND_MAX: i64 = 10;

/// Pause before a timestamp fortune is shown (ms).
pub const FORTUNE_DELAY_MS: u64 = 1_000;

/// Each band slice covers two seconds.
pub const SECONDS_PER_SAMPLE: u32 = 2;

// ============================================================================
// Waveform previews
// ============================================================================

pub const WAVEFORM_WIDTH: u32 = 80;
pub const WAVEFORM_HEIGHT: u32 = 60;
