use std::sync::Arc;

use clickscope_core::{config::Config, enrich::Enricher, store::VisitStore};
use clickscope_duckdb::DuckDbBackend;

use crate::insight::{ChatCompletionsClient, InsightRequester, TextGenerator};

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// Built once in `main` and never mutated afterwards. The store handle is the
/// only resource reused across requests.
pub struct AppState {
    pub store: Arc<dyn VisitStore>,
    pub enricher: Enricher,
    pub insights: InsightRequester,
    pub config: Arc<Config>,
}

impl AppState {
    /// Production wiring: DuckDB store and the configured chat-completions endpoint.
    pub fn new(db: DuckDbBackend, config: Config) -> anyhow::Result<Self> {
        let generator = Arc::new(ChatCompletionsClient::new(&config)?);
        Ok(Self::with_generator(Arc::new(db), config, generator))
    }

    /// Wiring with an explicit store and generator (tests, alternative backends).
    pub fn with_generator(
        store: Arc<dyn VisitStore>,
        config: Config,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            store,
            enricher: Enricher::default(),
            insights: InsightRequester::new(generator),
            config: Arc::new(config),
        }
    }
}
