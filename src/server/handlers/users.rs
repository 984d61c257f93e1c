use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use super::AppState;
use crate::error::GatewayError;
use crate::filter::RecordFilter;
use crate::storage::Record;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Record>>, GatewayError> {
    let rows = state
        .gateway
        .list(params.page.as_deref(), params.limit.as_deref())
        .await?;
    Ok(Json(rows))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, GatewayError> {
    let row = state.gateway.lookup_one(&id).await?;
    Ok(Json(row))
}

pub async fn filtered_data(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Record>>, GatewayError> {
    let filter = RecordFilter::from_params(params.occupation, params.gender, params.age);
    let rows = state.gateway.filtered_fetch(filter).await?;
    Ok(Json(rows))
}
