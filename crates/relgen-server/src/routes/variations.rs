//! Variation query routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use relgen_variations::VariationRecord;
use serde::Serialize;
use serde_json::Value;

use crate::{AppState, Result};

/// Summary returned by a reload
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub repos: Vec<String>,
    pub warnings: Vec<String>,
}

/// Every loaded variation
pub async fn dump(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let held = state.variations.read().await;
    let value = serde_json::to_value(&*held).map_err(relgen_variations::Error::from)?;
    Ok(Json(value))
}

/// One testsuite record
pub async fn record(
    State(state): State<Arc<AppState>>,
    Path((repo, branch, trigger, testsuite)): Path<(String, String, String, String)>,
) -> Result<Json<VariationRecord>> {
    let held = state.variations.read().await;
    let record = held.lookup(&repo, &branch, &trigger, &testsuite)?;
    Ok(Json(record.clone()))
}

/// One field of a testsuite record
pub async fn field(
    State(state): State<Arc<AppState>>,
    Path((repo, branch, trigger, testsuite, field)): Path<(String, String, String, String, String)>,
) -> Result<Json<Value>> {
    let held = state.variations.read().await;
    let value = held.query(&repo, &branch, &trigger, &testsuite, &field)?;
    Ok(Json(value))
}

/// Re-read the variations file
pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<ReloadResponse>> {
    let parsed = state.reload().await?;
    Ok(Json(ReloadResponse {
        repos: parsed
            .variations
            .repos()
            .into_iter()
            .map(String::from)
            .collect(),
        warnings: parsed.warnings.iter().map(ToString::to_string).collect(),
    }))
}
