//! Prediction API handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use spendwise_core::{collect_json, Recommendation};

/// POST /api/predict - Recommendation for one household
///
/// The body is a JSON object keyed by column name (`"Eating_Out": 2000`).
/// Absent fields count as 0.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Recommendation>, AppError> {
    let object = body
        .as_object()
        .ok_or_else(|| AppError::bad_request("Request body must be a JSON object"))?;

    let input = collect_json(object).map_err(AppError::from_core)?;
    let recommendation = state.pipeline.run(&input).map_err(AppError::from_core)?;

    Ok(Json(recommendation))
}
