//! Recipe fetch endpoint
//!
//! Bridges the URL form to the fetcher: the client submits an arbitrary
//! recipe page URL and receives the structured payload back.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::{scrape, AppState};
use recipes_common::models::ScrapedRecipe;

/// Query parameters for GET /fetch-recipe
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    pub url: Option<String>,
}

/// GET /fetch-recipe?url=...
///
/// Fetches the page and returns the extracted recipe payload. The payload
/// is not persisted; the client forwards it to POST /save-recipe.
pub async fn fetch_recipe(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> ApiResult<Json<ScrapedRecipe>> {
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("URL parameter is missing".to_string()))?;

    let recipe = scrape::scrape_recipe(&state.http, url)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(recipe))
}
