use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::AppState;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
pub struct RawQueryRequest {
    /// Optional so a missing field maps to the contract's 400 body rather
    /// than an extractor rejection.
    pub query: Option<String>,
}

pub async fn execute_query(
    State(state): State<AppState>,
    Json(req): Json<RawQueryRequest>,
) -> Result<Json<Vec<Map<String, Value>>>, GatewayError> {
    let text = req.query.unwrap_or_default();
    let rows = state.gateway.raw_query(&text).await?;
    Ok(Json(rows))
}
