use async_trait::async_trait;

use clickscope_core::store::VisitStore;
use clickscope_core::visit::{HourlyCounter, RawVisit, ReferrerCounter};

use crate::DuckDbBackend;

#[async_trait]
impl VisitStore for DuckDbBackend {
    async fn fetch_recent_visits(
        &self,
        url_id: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<RawVisit>> {
        DuckDbBackend::fetch_recent_visits(self, url_id, limit).await
    }

    async fn fetch_hourly_counters(&self, url_id: i64) -> anyhow::Result<Vec<HourlyCounter>> {
        DuckDbBackend::fetch_hourly_counters(self, url_id).await
    }

    async fn fetch_top_referrers(
        &self,
        url_id: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ReferrerCounter>> {
        DuckDbBackend::fetch_top_referrers(self, url_id, limit).await
    }

    async fn ping(&self) -> anyhow::Result<()> {
        DuckDbBackend::ping(self).await
    }
}
