//! Per-request fetch → enrich → aggregate / summarise.
//!
//! Aggregates cover the sampling window only (the newest
//! [`BREAKDOWN_WINDOW`] or [`SUMMARY_WINDOW`] records), not full history.
//! Totals in the summary come from the store's hourly counters instead.

use crate::aggregate::{aggregate, BREAKDOWN_WINDOW, SUMMARY_WINDOW, TOP_REFERRER_LIMIT};
use crate::enrich::Enricher;
use crate::store::VisitStore;
use crate::summary::SummaryBuilder;
use crate::visit::AnalyticsReport;

/// Summary text plus whether the window had any visits at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSummary {
    pub text: String,
    pub has_visits: bool,
}

/// Full breakdown report for `GET /analytics/{url_id}`.
pub async fn analytics_report(
    store: &dyn VisitStore,
    enricher: &Enricher,
    url_id: i64,
) -> anyhow::Result<AnalyticsReport> {
    let raw = store.fetch_recent_visits(url_id, BREAKDOWN_WINDOW).await?;
    Ok(aggregate(&enricher.enrich(&raw)))
}

/// Prompt context for the insight endpoints.
///
/// Counters are not fetched when the window is empty.
pub async fn traffic_summary(
    store: &dyn VisitStore,
    enricher: &Enricher,
    url_id: i64,
) -> anyhow::Result<TrafficSummary> {
    let raw = store.fetch_recent_visits(url_id, SUMMARY_WINDOW).await?;
    if raw.is_empty() {
        return Ok(TrafficSummary {
            text: SummaryBuilder::new(&[], &[], &[]).render(),
            has_visits: false,
        });
    }

    let visits = enricher.enrich(&raw);
    let hourly = store.fetch_hourly_counters(url_id).await?;
    let referrers = store.fetch_top_referrers(url_id, TOP_REFERRER_LIMIT).await?;

    Ok(TrafficSummary {
        text: SummaryBuilder::new(&visits, &hourly, &referrers).render(),
        has_visits: true,
    })
}
