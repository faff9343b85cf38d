//! Deterministic prose summary of a URL's traffic, used as prompt context.

use crate::aggregate::{browser_counts, device_counts, most_active_day, os_counts};
use crate::visit::{EnrichedVisit, HourlyCounter, ReferrerCounter};

pub const PRIVACY_DISCLAIMER: &str = "Due to privacy measures (IP hashing), precise geolocation data cannot be provided in this analysis.";
pub const NO_VISIT_DATA: &str = "No visit data available.";
/// Referrers named in the summary (the store returns up to ten).
pub const SUMMARY_REFERRER_COUNT: usize = 3;
const SENTENCE_SEPARATOR: &str = ". ";

/// Renders the summary paragraph.
///
/// - `visits`: the enriched recent window (device / OS / browser mix)
/// - `hourly`: store hourly counters, ascending (totals, peak range, busiest day)
/// - `referrers`: store top referrers, count descending
pub struct SummaryBuilder<'a> {
    visits: &'a [EnrichedVisit],
    hourly: &'a [HourlyCounter],
    referrers: &'a [ReferrerCounter],
}

impl<'a> SummaryBuilder<'a> {
    pub fn new(
        visits: &'a [EnrichedVisit],
        hourly: &'a [HourlyCounter],
        referrers: &'a [ReferrerCounter],
    ) -> Self {
        Self {
            visits,
            hourly,
            referrers,
        }
    }

    /// `true` when the recent window is empty and [`render`](Self::render)
    /// returns [`NO_VISIT_DATA`].
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_VISIT_DATA.to_string();
        }

        let mut parts: Vec<String> = Vec::new();

        let total: i64 = self.hourly.iter().map(|c| c.count).sum();
        parts.push(format!("Total clicks: {total}"));

        if let (Some(first), Some(last)) = (self.hourly.first(), self.hourly.last()) {
            parts.push(format!(
                "Clicks peaked between {} and {} on average per hour",
                first.hour_bucket.format("%H:%M"),
                last.hour_bucket.format("%H:%M")
            ));
        }
        if let Some(day) = most_active_day(self.hourly) {
            parts.push(format!(
                "The most active day appears to be: {}",
                day.format("%Y-%m-%d")
            ));
        }

        if !self.referrers.is_empty() {
            let top = self
                .referrers
                .iter()
                .take(SUMMARY_REFERRER_COUNT)
                .map(|r| format!("{} ({} clicks)", r.referrer, r.count))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("Top referrers include: {top}"));
        }

        parts.extend(category_sentence(
            &device_counts(self.visits),
            "Device usage breakdown",
            "Majority device type",
        ));
        parts.extend(category_sentence(
            &os_counts(self.visits),
            "Operating System breakdown",
            "Majority OS",
        ));
        parts.extend(category_sentence(
            &browser_counts(self.visits),
            "Browser breakdown",
            "Majority browser",
        ));

        parts.push(PRIVACY_DISCLAIMER.to_string());
        parts.join(SENTENCE_SEPARATOR)
    }
}

/// Multi-category → count map, single category → "majority" sentence, none → nothing.
fn category_sentence(counts: &[(String, i64)], breakdown: &str, majority: &str) -> Option<String> {
    match counts {
        [] => None,
        [(only, _)] => Some(format!("{majority}: {only}")),
        many => {
            let map = many
                .iter()
                .map(|(label, count)| format!("{label}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!("{breakdown}: {{{map}}}"))
        }
    }
}
