//! Reversible, lightly obfuscated identifier tokens.
//!
//! Data tokens carry `(headband, run)`:
//!
//! ```text
//! obf_headband = (headband ^ 0xB) + 37
//! obf_run      = ((run ^ 0x2A) * 17) + 531
//! token        = base64("{obf_headband}x{obf_run}") without '=' padding
//! ```
//!
//! Fortune tokens carry a timestamp: `base64("f{timestamp}")`.
//!
//! This is obfuscation for compact, casually unreadable URLs. It offers no
//! confidentiality.

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

const HEADBAND_XOR: i64 = 0xB;
const HEADBAND_OFFSET: i64 = 37;
const RUN_XOR: i64 = 0x2A;
const RUN_MULTIPLIER: i64 = 17;
const RUN_OFFSET: i64 = 531;

/// A decoded identifier token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Identifier {
    Data { headband: i64, run: i64 },
    Fortune { timestamp: u64 },
}

impl Identifier {
    /// Encode back into a token.
    #[must_use]
    pub fn encode(&self) -> String {
        match *self {
            Self::Data { headband, run } => encode_data(headband, run),
            Self::Fortune { timestamp } => encode_fortune(timestamp),
        }
    }
}

fn fortune_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^f(\d+)$").expect("fortune token pattern is valid"))
}

fn data_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)x(-?\d+)$").expect("data token pattern is valid"))
}

/// Encode a `(headband, run)` pair.
#[must_use]
pub fn encode_data(headband: i64, run: i64) -> String {
    let obf_headband = (headband ^ HEADBAND_XOR).wrapping_add(HEADBAND_OFFSET);
    let obf_run = (run ^ RUN_XOR)
        .wrapping_mul(RUN_MULTIPLIER)
        .wrapping_add(RUN_OFFSET);
    encode_text(&format!("{obf_headband}x{obf_run}"))
}

/// Encode a fortune-mode timestamp.
#[must_use]
pub fn encode_fortune(timestamp: u64) -> String {
    encode_text(&format!("f{timestamp}"))
}

fn encode_text(text: &str) -> String {
    general_purpose::STANDARD
        .encode(text.as_bytes())
        .trim_end_matches('=')
        .to_string()
}

/// Decode a token. Any failure yields `None`; callers fall back to the
/// legacy plain parameters.
#[must_use]
pub fn decode(token: &str) -> Option<Identifier> {
    let text = decode_text(token)?;

    if let Some(caps) = fortune_pattern().captures(&text) {
        let timestamp = caps[1].parse::<u64>().ok()?;
        return Some(Identifier::Fortune { timestamp });
    }

    let caps = data_pattern().captures(&text)?;
    let obf_headband = caps[1].parse::<i64>().ok()?;
    let obf_run = caps[2].parse::<i64>().ok()?;

    let headband = obf_headband.checked_sub(HEADBAND_OFFSET)? ^ HEADBAND_XOR;
    // Truncating division; exact for any token produced by `encode_data`.
    let run = (obf_run.checked_sub(RUN_OFFSET)? / RUN_MULTIPLIER) ^ RUN_XOR;

    Some(Identifier::Data { headband, run })
}

fn decode_text(token: &str) -> Option<String> {
    // Query strings may carry '+' as ' ', and some links use the URL-safe alphabet.
    let mut normalized: String = token
        .chars()
        .map(|c| match c {
            ' ' | '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    let padding = (4 - normalized.len() % 4) % 4;
    normalized.extend(std::iter::repeat('=').take(padding));

    let bytes = match general_purpose::STANDARD.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(token = %token, error = %e, "Identifier token is not valid base64");
            return None;
        }
    };
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_round_trip_full_range() {
        for headband in 0..=10 {
            for run in 1..=10_000 {
                assert_eq!(
                    decode(&encode_data(headband, run)),
                    Some(Identifier::Data { headband, run }),
                    "headband={headband} run={run}"
                );
            }
        }
    }

    #[test]
    fn test_data_token_plaintext() {
        // headband 3 -> (3 ^ 11) + 37 = 45; run 5 -> ((5 ^ 42) * 17) + 531 = 1330
        let token = encode_data(3, 5);
        let bytes = general_purpose::STANDARD_NO_PAD.decode(&token).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "45x1330");
        assert!(!token.contains('='));
    }

    #[test]
    fn test_fortune_round_trip() {
        for timestamp in [0_u64, 1, 7, 1_700_000_000_000, u64::MAX] {
            assert_eq!(
                decode(&encode_fortune(timestamp)),
                Some(Identifier::Fortune { timestamp })
            );
        }
    }

    #[test]
    fn test_negative_run_round_trips() {
        assert_eq!(decode(&encode_data(2, -40)), Some(Identifier::Data { headband: 2, run: -40 }));
    }

    #[test]
    fn test_garbage_decodes_to_none() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("!!!"), None);
        assert_eq!(decode("a"), None);
        // "hello" is valid base64 text but matches neither pattern
        assert_eq!(decode(&encode_text("hello")), None);
        assert_eq!(decode(&encode_text("f12a")), None);
    }

    #[test]
    fn test_space_in_query_is_read_as_plus() {
        let token = encode_data(7, 4242);
        let mangled = token.replace('+', " ");
        assert_eq!(decode(&mangled), decode(&token));
    }

    #[test]
    fn test_identifier_encode_matches_free_functions() {
        let id = Identifier::Data { headband: 1, run: 2 };
        assert_eq!(id.encode(), encode_data(1, 2));
        let id = Identifier::Fortune { timestamp: 99 };
        assert_eq!(id.encode(), encode_fortune(99));
    }
}
