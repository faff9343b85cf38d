/// DuckDB initialization SQL.
///
/// Executed once at open time via `Connection::execute_batch`. Every statement
/// uses `IF NOT EXISTS`, so re-running on each startup is a no-op.
///
/// `memory_limit` comes from `Config.duckdb_memory_limit`
/// (env `CLICKSCOPE_DUCKDB_MEMORY`, default `"1GB"`). Always set an explicit
/// limit: the DuckDB default (80% of system RAM) is not acceptable for a
/// server process.
///
/// `visitor_ip_hash` holds sha256(ip) as 64 hex chars. Raw addresses are never
/// written.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

CREATE SEQUENCE IF NOT EXISTS visits_id_seq START 1;

CREATE TABLE IF NOT EXISTS visits (
    id              BIGINT PRIMARY KEY DEFAULT nextval('visits_id_seq'),
    url_id          BIGINT NOT NULL,
    visitor_ip_hash VARCHAR(64),
    user_agent      VARCHAR,
    referer         VARCHAR,
    clicked_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_visits_url_clicked ON visits(url_id, clicked_at);
"#
    )
}
