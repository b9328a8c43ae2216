use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::RouteError;
use super::state::AppState;
use crate::entities::manufacturer::{DEFAULT_SERIOUSNESS, ManufacturersResponse};
use crate::entities::trend::TrendResponse;
use crate::entities::{event, manufacturer, require_drug, trend};

#[derive(Debug, Deserialize)]
pub struct EventsParams {
    drug: Option<String>,
    serious: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManufacturersParams {
    drug: Option<String>,
    seriousness: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsParams {
    drug: Option<String>,
}

pub async fn home_handler() -> Result<Html<String>, RouteError> {
    Ok(Html(crate::render::html::homepage()?))
}

pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsParams>,
) -> Result<Json<Value>, RouteError> {
    let drug = require_drug(params.drug.as_deref()).map_err(RouteError::validation)?;

    event::search(&state.openfda, drug, params.serious.as_deref())
        .await
        .map(Json)
        .map_err(|err| RouteError::Upstream(err.to_string()))
}

pub async fn manufacturers_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ManufacturersParams>,
) -> Result<Json<ManufacturersResponse>, RouteError> {
    let drug = require_drug(params.drug.as_deref()).map_err(RouteError::validation)?;
    let seriousness = params.seriousness.as_deref().unwrap_or(DEFAULT_SERIOUSNESS);

    let body = state
        .local
        .fetch_events(drug, seriousness)
        .await
        .map_err(|err| RouteError::Upstream(format!("Failed to fetch data: {err}")))?;

    Ok(Json(manufacturer::from_events_body(&body, drug)?))
}

/// Upstream and decoding failures are not caught here and surface as a bare 500.
pub async fn trends_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendsParams>,
) -> Result<Json<TrendResponse>, RouteError> {
    let drug = require_drug(params.drug.as_deref()).map_err(RouteError::validation)?;

    let body = event::search(&state.openfda, drug, None).await?;
    Ok(Json(trend::from_events_body(&body, drug)?))
}
