use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use clickscope_core::{pipeline::analytics_report, visit::AnalyticsReport};

use crate::{error::AppError, state::AppState};

/// `GET /analytics/{url_id}` - breakdowns over the newest 1000 visits.
///
/// An unknown or unvisited URL yields the empty report, not a 404.
#[tracing::instrument(skip(state))]
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(url_id): Path<i64>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let report = analytics_report(state.store.as_ref(), &state.enricher, url_id).await?;
    Ok(Json(report))
}
