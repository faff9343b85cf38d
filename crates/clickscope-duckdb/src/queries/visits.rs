use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};

use clickscope_core::error::CoreError;
use clickscope_core::visit::{HourlyCounter, RawVisit, ReferrerCounter};

use crate::DuckDbBackend;

/// Parse a `CAST(ts AS VARCHAR)` value. DuckDB omits the fractional part when
/// it is zero, which `%.f` accepts.
pub(crate) fn parse_db_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

impl DuckDbBackend {
    /// Newest-first visits for `url_id`. Equal timestamps fall back to id order.
    pub async fn fetch_recent_visits(&self, url_id: i64, limit: usize) -> Result<Vec<RawVisit>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, url_id, visitor_ip_hash, user_agent, referer,
                   CAST(clicked_at AS VARCHAR)
            FROM visits
            WHERE url_id = ?1
            ORDER BY clicked_at DESC, id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![url_id, limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut visits = Vec::new();
        for row in rows {
            let (id, url_id, visitor_hash, user_agent, referrer, clicked_at) = row?;
            visits.push(RawVisit {
                id,
                url_id,
                visitor_hash,
                user_agent,
                referrer,
                clicked_at: parse_db_timestamp(&clicked_at)?,
            });
        }
        Ok(visits)
    }

    /// Clicks per hour over full history, oldest first.
    pub async fn fetch_hourly_counters(&self, url_id: i64) -> Result<Vec<HourlyCounter>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT CAST(date_trunc('hour', clicked_at) AS VARCHAR) AS bucket,
                   COUNT(*) AS clicks
            FROM visits
            WHERE url_id = ?1
            GROUP BY bucket
            ORDER BY bucket
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![url_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counters = Vec::new();
        for row in rows {
            let (bucket, count) = row?;
            counters.push(HourlyCounter {
                hour_bucket: parse_db_timestamp(&bucket)?,
                count,
            });
        }
        Ok(counters)
    }

    /// Most frequent referrers, skipping NULL and blank values (those count as
    /// direct traffic). Equal counts sort by referrer.
    pub async fn fetch_top_referrers(
        &self,
        url_id: i64,
        limit: usize,
    ) -> Result<Vec<ReferrerCounter>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT referer, COUNT(*) AS clicks
            FROM visits
            WHERE url_id = ?1 AND referer IS NOT NULL AND trim(referer, ' ' || chr(9) || chr(10) || chr(13)) != ''
            GROUP BY referer
            ORDER BY clicks DESC, referer ASC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![url_id, limit as i64], |row| {
            Ok(ReferrerCounter {
                referrer: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
