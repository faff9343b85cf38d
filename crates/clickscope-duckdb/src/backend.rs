use std::sync::Arc;

use anyhow::Result;
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use clickscope_core::visit::NewVisit;

use crate::schema::init_sql;

/// Timestamp layout written to and read back from DuckDB `TIMESTAMP` columns
/// (naive, always UTC).
pub(crate) const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// DuckDB-backed visit store.
///
/// The connection sits behind `Arc<Mutex<_>>` so a single handle is shared by
/// every request. Reads are short; there is no other shared state.
pub struct DuckDbBackend {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Open (or create) a DuckDB database file at `path` and apply the schema.
    ///
    /// `memory_limit` is a DuckDB size string such as `"1GB"` or `"512MB"`.
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        info!(path, memory_limit, "DuckDB opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an **in-memory** DuckDB database.
    ///
    /// Intended for tests; data is discarded on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("1GB"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a batch of visits in a single transaction.
    ///
    /// Seeding only: the request paths never write visits.
    ///
    /// No-op for an empty batch.
    pub async fn insert_visits(&self, visits: &[NewVisit]) -> Result<()> {
        if visits.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for visit in visits {
            tx.execute(
                r#"INSERT INTO visits (url_id, visitor_ip_hash, user_agent, referer, clicked_at)
                   VALUES (?1, ?2, ?3, ?4, CAST(?5 AS TIMESTAMP))"#,
                duckdb::params![
                    visit.url_id,
                    visit.visitor_hash,
                    visit.user_agent,
                    visit.referrer,
                    visit.clicked_at.format(DB_TIMESTAMP_FORMAT).to_string(),
                ],
            )?;
        }
        tx.commit()?;
        tracing::debug!(count = visits.len(), "Inserted visits");
        Ok(())
    }

    /// Execute `SELECT 1` as a lightweight liveness check.
    pub async fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }
}
