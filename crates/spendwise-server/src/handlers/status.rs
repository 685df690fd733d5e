//! Schema and health handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use spendwise_core::{ArtifactInfo, SCHEMA_VERSION};

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub version: u32,
    pub columns: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub artifacts: Vec<ArtifactInfo>,
}

/// GET /api/schema - Column order the preprocessor expects
pub async fn schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        version: SCHEMA_VERSION,
        columns: state.pipeline.schema().to_vec(),
    })
}

/// GET /api/health - Loaded models and their fingerprints
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        primary: state.pipeline.primary_kind(),
        secondary: state.pipeline.secondary_kind(),
        artifacts: state.pipeline.artifacts().to_vec(),
    })
}
