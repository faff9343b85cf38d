//! Record store abstraction.

use async_trait::async_trait;

use crate::visit::{HourlyCounter, RawVisit, ReferrerCounter};

/// Read-side contract of the visit store.
///
/// The pipeline only reads; inserts are a concern of the concrete backend.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait VisitStore: Send + Sync + 'static {
    /// Most recent visits for `url_id`, newest first, at most `limit` rows.
    async fn fetch_recent_visits(&self, url_id: i64, limit: usize)
        -> anyhow::Result<Vec<RawVisit>>;

    /// Click counts per hour over the URL's full history, oldest hour first.
    async fn fetch_hourly_counters(&self, url_id: i64) -> anyhow::Result<Vec<HourlyCounter>>;

    /// Most frequent non-empty referrers, count descending, at most `limit` rows.
    async fn fetch_top_referrers(
        &self,
        url_id: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ReferrerCounter>>;

    /// Lightweight liveness check.
    async fn ping(&self) -> anyhow::Result<()>;
}
