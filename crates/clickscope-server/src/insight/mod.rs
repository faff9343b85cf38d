//! Boundary to the external text-generation service.
//!
//! Every method returns a `String`. Generation failures come back as the
//! [`GenerationError`] fallback text, so callers always have content to show.

use std::sync::Arc;

use tracing::warn;

use clickscope_core::pipeline::TrafficSummary;

pub mod client;
pub mod prompts;

pub use client::{ChatCompletionsClient, GenerationError, TextGenerator};

/// Returned by [`InsightRequester::insight`] without calling the service when
/// the URL has no visits.
pub const NO_DATA_INSIGHT: &str = "No visit data available to generate insights.";

pub struct InsightRequester {
    generator: Arc<dyn TextGenerator>,
}

impl InsightRequester {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Freeform 1-3 sentence insight.
    pub async fn insight(&self, url_id: i64, summary: &TrafficSummary) -> String {
        if !summary.has_visits {
            return NO_DATA_INSIGHT.to_string();
        }
        self.request(url_id, "insight", prompts::freeform_prompt(&summary.text))
            .await
    }

    /// Insight restricted to one dashboard graph.
    pub async fn graph_insight(
        &self,
        url_id: i64,
        summary: &TrafficSummary,
        graph_type: &str,
    ) -> String {
        self.request(
            url_id,
            "graph_insight",
            prompts::graph_prompt(&summary.text, graph_type),
        )
        .await
    }

    /// Answer a free-text question about the URL's traffic.
    pub async fn chat(
        &self,
        url_id: i64,
        summary: &TrafficSummary,
        message: &str,
        context: Option<&str>,
    ) -> String {
        self.request(
            url_id,
            "chat",
            prompts::chat_prompt(&summary.text, message, context),
        )
        .await
    }

    async fn request(&self, url_id: i64, kind: &'static str, prompt: String) -> String {
        match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url_id, kind, error = %e, "Generation failed; returning fallback text");
                e.to_string()
            }
        }
    }
}
