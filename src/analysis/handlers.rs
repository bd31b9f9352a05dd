use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    analysis::dto::{AnalyzeRequest, CroAnalysis},
    error::{AppError, AppResult},
    state::AppState,
    validation::ValidJson,
};

pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[instrument(skip(state, payload), fields(url = %payload.url()))]
pub async fn analyze(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AnalyzeRequest>,
) -> AppResult<Json<CroAnalysis>> {
    let analysis = state
        .analyzer
        .analyze(payload.url())
        .await
        .map_err(|e| AppError::Internal(e.context("analyze site")))?;
    info!(score = analysis.overall_score, "analysis completed");
    Ok(Json(analysis))
}
