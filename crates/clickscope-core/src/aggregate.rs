//! Group-by / count / sort / truncate over an enriched sampling window.
//!
//! Ordering rules:
//! - categorical breakdowns: count descending; equal counts keep the order in
//!   which the category first appears in the input window
//! - `clicks_over_time`: date ascending
//! - `hourly_pattern`: hour ascending, only hours present in the data
//!
//! Every visit lands in exactly one bucket per dimension, so each categorical
//! breakdown sums to `total_clicks`.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Timelike};

use crate::classifier::{UNKNOWN_BROWSER, UNKNOWN_OS};
use crate::visit::{
    AnalyticsReport, BrowserCount, ClicksByDate, DeviceCount, EnrichedVisit, HourlyCount,
    HourlyCounter, ReferrerCount,
};

/// Records fetched for the summary / insight prompts.
pub const SUMMARY_WINDOW: usize = 500;
/// Records fetched for `GET /analytics/{url_id}`.
pub const BREAKDOWN_WINDOW: usize = 1000;
pub const TOP_REFERRER_LIMIT: usize = 10;

pub const DIRECT: &str = "Direct";
/// Device bucket for visits recorded without a user agent.
pub const UNKNOWN_DEVICE: &str = "Unknown";

/// Canonical referrer label: missing or blank referrers count as direct traffic.
pub fn canonical_referrer(referrer: Option<&str>) -> &str {
    match referrer {
        Some(r) if !r.trim().is_empty() => r,
        _ => DIRECT,
    }
}

/// Count occurrences of each key.
///
/// Output is sorted by count descending. The sort is stable over first-seen
/// order, which is what breaks ties.
pub fn count_by_key<'a, I>(keys: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, i64)> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn device_counts(visits: &[EnrichedVisit]) -> Vec<(String, i64)> {
    count_by_key(
        visits
            .iter()
            .map(|v| v.device_type.as_deref().unwrap_or(UNKNOWN_DEVICE)),
    )
}

pub fn os_counts(visits: &[EnrichedVisit]) -> Vec<(String, i64)> {
    count_by_key(visits.iter().map(|v| v.os.as_deref().unwrap_or(UNKNOWN_OS)))
}

pub fn browser_counts(visits: &[EnrichedVisit]) -> Vec<(String, i64)> {
    count_by_key(
        visits
            .iter()
            .map(|v| v.browser.as_deref().unwrap_or(UNKNOWN_BROWSER)),
    )
}

pub fn referrer_counts(visits: &[EnrichedVisit]) -> Vec<(String, i64)> {
    count_by_key(
        visits
            .iter()
            .map(|v| canonical_referrer(v.referrer.as_deref())),
    )
}

/// Build the full breakdown report for a window.
///
/// An empty window yields [`AnalyticsReport::default`].
pub fn aggregate(visits: &[EnrichedVisit]) -> AnalyticsReport {
    if visits.is_empty() {
        return AnalyticsReport::default();
    }

    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, i64> = BTreeMap::new();
    for v in visits {
        *by_date.entry(v.clicked_at.date_naive()).or_default() += 1;
        *by_hour.entry(v.clicked_at.hour()).or_default() += 1;
    }

    let mut referrer_breakdown: Vec<ReferrerCount> = referrer_counts(visits)
        .into_iter()
        .map(|(referrer, count)| ReferrerCount { referrer, count })
        .collect();
    referrer_breakdown.truncate(TOP_REFERRER_LIMIT);

    AnalyticsReport {
        total_clicks: visits.len() as i64,
        clicks_over_time: by_date
            .into_iter()
            .map(|(date, count)| ClicksByDate {
                date: date.format("%Y-%m-%d").to_string(),
                count,
            })
            .collect(),
        device_breakdown: device_counts(visits)
            .into_iter()
            .map(|(device, count)| DeviceCount { device, count })
            .collect(),
        browser_breakdown: browser_counts(visits)
            .into_iter()
            .map(|(browser, count)| BrowserCount { browser, count })
            .collect(),
        referrer_breakdown,
        hourly_pattern: by_hour
            .into_iter()
            .map(|(hour, count)| HourlyCount { hour, count })
            .collect(),
    }
}

/// Date with the most clicks across the store's hourly counters.
///
/// Ties resolve to the earliest date. `None` when there are no counters.
pub fn most_active_day(counters: &[HourlyCounter]) -> Option<NaiveDate> {
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for c in counters {
        *daily.entry(c.hour_bucket.date_naive()).or_default() += c.count;
    }
    let mut best: Option<(NaiveDate, i64)> = None;
    for (day, total) in daily {
        if best.map_or(true, |(_, max)| total > max) {
            best = Some((day, total));
        }
    }
    best.map(|(day, _)| day)
}
