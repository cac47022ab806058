//! Rate-limit quota tracking

use super::types::{RateLimitInfo, RateLimitSnapshot};
use arc_swap::ArcSwapOption;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tracing::debug;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Reset values below this are relative seconds, above it unix timestamps
const RELATIVE_RESET_LIMIT: i64 = 365 * 24 * 60 * 60;

/// Holds the most recent quota reported by a dependency
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    latest: ArcSwapOption<RateLimitInfo>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored quota
    pub fn observe(&self, remaining: u64, reset_at: DateTime<Utc>) {
        self.latest
            .store(Some(Arc::new(RateLimitInfo { remaining, reset_at })));
    }

    /// Update from response headers; responses without both headers are ignored
    pub fn observe_headers(&self, headers: &HeaderMap) {
        self.observe_headers_at(headers, Utc::now());
    }

    pub(crate) fn observe_headers_at(&self, headers: &HeaderMap, now: DateTime<Utc>) {
        let (Some(remaining), Some(reset)) = (headers.get(REMAINING_HEADER), headers.get(RESET_HEADER))
        else {
            return;
        };

        let remaining = match remaining.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()) {
            Some(v) => v,
            None => {
                debug!("Ignoring unparsable {} header: {:?}", REMAINING_HEADER, remaining);
                return;
            }
        };

        let reset_at = match reset
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| parse_reset(v, now))
        {
            Some(v) => v,
            None => {
                debug!("Ignoring unparsable {} header: {:?}", RESET_HEADER, reset);
                return;
            }
        };

        self.observe(remaining, reset_at);
    }

    /// Last observed quota
    pub fn current(&self) -> Option<RateLimitInfo> {
        self.latest.load_full().map(|info| (*info).clone())
    }

    /// Quota exhausted and the window has not reset yet
    pub fn is_rate_limited(&self) -> bool {
        self.is_rate_limited_at(Utc::now())
    }

    pub fn is_rate_limited_at(&self, now: DateTime<Utc>) -> bool {
        self.latest
            .load()
            .as_ref()
            .is_some_and(|info| info.remaining == 0 && now < info.reset_at)
    }

    pub fn snapshot(&self) -> RateLimitSnapshot {
        let now = Utc::now();
        let info = self.latest.load_full();
        RateLimitSnapshot {
            remaining: info.as_ref().map(|i| i.remaining),
            reset: info.as_ref().map(|i| i.reset_at),
            is_limited: self.is_rate_limited_at(now),
        }
    }
}

fn parse_reset(value: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if value < 0 {
        return None;
    }
    if value < RELATIVE_RESET_LIMIT {
        Some(now + chrono::Duration::seconds(value))
    } else {
        Utc.timestamp_opt(value, 0).single()
    }
}
