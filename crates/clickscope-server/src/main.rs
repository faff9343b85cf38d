use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use clickscope_server::{config::Config, state::AppState};

/// `clickscope health` - liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$CLICKSCOPE_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("CLICKSCOPE_PORT").unwrap_or_else(|_| "8001".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }

    // Structured JSON logging. Level controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clickscope=info".parse()?),
        )
        .json()
        .init();

    let cfg = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    std::fs::create_dir_all(&cfg.data_dir)?;
    let db = clickscope_duckdb::DuckDbBackend::open(&cfg.db_path(), &cfg.duckdb_memory_limit)?;

    info!(
        endpoint = %cfg.ai_api_url,
        model = %cfg.ai_model,
        timeout_secs = cfg.ai_timeout_secs,
        "Text generation endpoint configured"
    );

    let state = Arc::new(AppState::new(db, cfg.clone())?);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = clickscope_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "clickscope listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
