//! Pagination parameters for the favorite listing
//!
//! Malformed values are never rejected: anything that does not match the
//! accepted pattern silently falls back to the default.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_LIMIT: i64 = 30;
pub const DEFAULT_OFFSET: i64 = 0;

// 1..=100 without leading zeros
static LIMIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]?$|^100$").expect("valid limit pattern"));

static OFFSET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid offset pattern"));

/// Raw, untrusted parameters as they arrive from the query string or form body
#[derive(Debug, Clone, Default)]
pub struct RawPagination {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl RawPagination {
    /// Collect from decoded key/value pairs; a repeated key keeps its last value
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut raw, (key, value)| {
                match key.as_str() {
                    "limit" => raw.limit = Some(value),
                    "offset" => raw.offset = Some(value),
                    _ => {}
                }
                raw
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    pub fn from_raw(raw: &RawPagination) -> Self {
        Self {
            limit: parse_param(raw.limit.as_deref(), &LIMIT_PATTERN, DEFAULT_LIMIT),
            offset: parse_param(raw.offset.as_deref(), &OFFSET_PATTERN, DEFAULT_OFFSET),
        }
    }

    /// Clamp already-typed values into the accepted range
    pub fn normalize(limit: i64, offset: i64) -> Self {
        Self {
            limit: if (1..=100).contains(&limit) {
                limit
            } else {
                DEFAULT_LIMIT
            },
            offset: if offset >= 0 { offset } else { DEFAULT_OFFSET },
        }
    }
}

fn parse_param(value: Option<&str>, pattern: &Regex, default: i64) -> i64 {
    value
        .filter(|v| pattern.is_match(v))
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}
