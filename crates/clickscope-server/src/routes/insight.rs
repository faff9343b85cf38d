use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clickscope_core::pipeline::traffic_summary;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub url_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct GraphInsightRequest {
    pub url_id: i64,
    pub graph_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub url_id: i64,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub generated_at: DateTime<Utc>,
}

/// `POST /ai/insight` - freeform insight over the newest 500 visits.
///
/// Generation failures come back as fallback text with `200 OK`; only store
/// failures produce an error status.
#[tracing::instrument(skip(state, req), fields(url_id = req.url_id))]
pub async fn create_insight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, AppError> {
    let summary = traffic_summary(state.store.as_ref(), &state.enricher, req.url_id).await?;
    let insight = state.insights.insight(req.url_id, &summary).await;
    Ok(Json(InsightResponse {
        insight,
        generated_at: Utc::now(),
    }))
}

/// `POST /ai/graph-insight` - insight focused on one dashboard graph.
#[tracing::instrument(skip(state, req), fields(url_id = req.url_id, graph_type = %req.graph_type))]
pub async fn create_graph_insight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GraphInsightRequest>,
) -> Result<Json<InsightResponse>, AppError> {
    let graph_type = req.graph_type.trim();
    if graph_type.is_empty() {
        return Err(AppError::BadRequest(
            "graph_type must not be empty".to_string(),
        ));
    }

    let summary = traffic_summary(state.store.as_ref(), &state.enricher, req.url_id).await?;
    let insight = state
        .insights
        .graph_insight(req.url_id, &summary, graph_type)
        .await;
    Ok(Json(InsightResponse {
        insight,
        generated_at: Utc::now(),
    }))
}

/// `POST /ai/chat` - answer a question about the URL's traffic.
#[tracing::instrument(skip(state, req), fields(url_id = req.url_id))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let summary = traffic_summary(state.store.as_ref(), &state.enricher, req.url_id).await?;
    let response = state
        .insights
        .chat(req.url_id, &summary, message, req.context.as_deref())
        .await;
    Ok(Json(ChatResponse {
        response,
        generated_at: Utc::now(),
    }))
}
