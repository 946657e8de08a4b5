//! Page query resolution.
//!
//! Precedence:
//! 1. `id` token (see [`super::decode`])
//! 2. legacy plain parameters `headband` / `h` and `run` / `r`
//!
//! A missing or out-of-range headband is not an error: the page falls back
//! to fortune mode keyed by the current time.

use serde::Deserialize;
use std::ops::RangeInclusive;
use tracing::debug;

use super::{decode, Identifier};

/// Raw query parameters as they arrive in the page URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub id: Option<String>,
    pub headband: Option<String>,
    pub h: Option<String>,
    pub run: Option<String>,
    pub r: Option<String>,
}

/// What the page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Fetch this headband; `run: None` lets the server pick the latest run.
    Data { headband: i64, run: Option<i64> },
    /// Fortune keyed by a known timestamp (from a fortune token).
    Fortune { timestamp: u64 },
    /// No usable headband; fortune keyed by the current time.
    FortuneNow,
}

impl PageQuery {
    /// Resolve into a request, accepting headbands within `headbands`.
    #[must_use]
    pub fn resolve(&self, headbands: &RangeInclusive<i64>) -> PageRequest {
        let (headband, run) = match self.id.as_deref().and_then(decode) {
            Some(Identifier::Fortune { timestamp }) => {
                return PageRequest::Fortune { timestamp };
            }
            Some(Identifier::Data { headband, run }) => (Some(headband), Some(run)),
            None => {
                if let Some(token) = self.id.as_deref() {
                    debug!(token = %token, "Undecodable id, falling back to legacy parameters");
                }
                (
                    first_int(&[&self.headband, &self.h]),
                    first_int(&[&self.run, &self.r]),
                )
            }
        };

        match headband {
            Some(h) if headbands.contains(&h) => PageRequest::Data { headband: h, run },
            _ => PageRequest::FortuneNow,
        }
    }
}

fn first_int(candidates: &[&Option<String>]) -> Option<i64> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find_map(|v| v.trim().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{encode_data, encode_fortune};

    const RANGE: RangeInclusive<i64> = 0..=10;

    #[test]
    fn test_id_token_wins_over_legacy() {
        let query = PageQuery {
            id: Some(encode_data(4, 12)),
            headband: Some("9".into()),
            run: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(query.resolve(&RANGE), PageRequest::Data { headband: 4, run: Some(12) });
    }

    #[test]
    fn test_fortune_token() {
        let query = PageQuery { id: Some(encode_fortune(1234)), ..Default::default() };
        assert_eq!(query.resolve(&RANGE), PageRequest::Fortune { timestamp: 1234 });
    }

    #[test]
    fn test_bad_token_falls_back_to_short_legacy_keys() {
        let query = PageQuery {
            id: Some("not-a-token".into()),
            h: Some("2".into()),
            r: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(query.resolve(&RANGE), PageRequest::Data { headband: 2, run: Some(7) });
    }

    #[test]
    fn test_legacy_without_run() {
        let query = PageQuery { headband: Some("10".into()), ..Default::default() };
        assert_eq!(query.resolve(&RANGE), PageRequest::Data { headband: 10, run: None });
    }

    #[test]
    fn test_missing_or_out_of_range_headband_is_fortune_mode() {
        assert_eq!(PageQuery::default().resolve(&RANGE), PageRequest::FortuneNow);
        let high = PageQuery { headband: Some("11".into()), ..Default::default() };
        assert_eq!(high.resolve(&RANGE), PageRequest::FortuneNow);
        let low = PageQuery { h: Some("-1".into()), ..Default::default() };
        assert_eq!(low.resolve(&RANGE), PageRequest::FortuneNow);
        let junk = PageQuery { h: Some("abc".into()), ..Default::default() };
        assert_eq!(junk.resolve(&RANGE), PageRequest::FortuneNow);
    }

    #[test]
    fn test_decoded_out_of_range_headband_is_fortune_mode() {
        let query = PageQuery { id: Some(encode_data(42, 1)), ..Default::default() };
        assert_eq!(query.resolve(&RANGE), PageRequest::FortuneNow);
    }
}
