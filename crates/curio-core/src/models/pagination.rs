use serde::Serialize;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// A validated page window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Normalize raw query values.
    ///
    /// Missing, unparsable or zero values fall back to the defaults; the page is at
    /// least 1 and the limit is clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_non_zero(page).unwrap_or(DEFAULT_PAGE).max(1);
        let limit = parse_non_zero(limit)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn parse_non_zero(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
}
