//! Recipe CRUD endpoints
//!
//! List, save, increment-cooked, delete, and detail. The store owns
//! canonical state; clients rebuild their view from GET /get-recipes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::db::recipes as db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use recipes_common::models::{
    IncrementResponse, RecipeDetail, RecipeSummary, SaveRecipeResponse, ScrapedRecipe,
};

/// GET /get-recipes
///
/// Full recipe list in gallery order (most cooked first, then oldest).
pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<RecipeSummary>>> {
    let rows = db::list_recipes(&state.db).await?;

    let summaries = rows
        .into_iter()
        .map(|row| RecipeSummary {
            image_url: image_url(row.has_image, row.id),
            id: row.id,
            title: row.title,
            times_cooked: row.times_cooked,
            category: row.category,
        })
        .collect();

    Ok(Json(summaries))
}

/// POST /save-recipe
///
/// Persists a fetched recipe payload. Downloads the source image (stored as
/// a BLOB), classifies the ingredients when a classifier is configured, and
/// returns the assigned id plus the local image URL.
pub async fn save_recipe(
    State(state): State<AppState>,
    Json(payload): Json<ScrapedRecipe>,
) -> ApiResult<(StatusCode, Json<SaveRecipeResponse>)> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Recipe title is missing".to_string()));
    }

    // Titles are unique in the store
    if db::title_exists(&state.db, &title).await? {
        return Err(ApiError::BadRequest("Recipe already exists".to_string()));
    }

    let image = match payload.image.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => download_image(&state.http, url).await,
        None => None,
    };

    // Classification failures never fail the save; the recipe just stays
    // uncategorized
    let category = match &state.classifier {
        Some(classifier) if !payload.ingredients.is_empty() => {
            match classifier.classify(&payload.ingredients).await {
                Ok(category) => Some(category),
                Err(e) => {
                    warn!("Category classification failed for '{}': {}", title, e);
                    None
                }
            }
        }
        _ => None,
    };

    let record = db::NewRecipe {
        title,
        yields: payload.yields,
        prep_time: payload.prep_time,
        cook_time: payload.cook_time,
        ingredients: payload.ingredients.join(","),
        instructions: payload.instructions,
        image,
        category,
    };

    let id = db::insert_recipe(&state.db, &record).await?;
    info!("Saved recipe {} ('{}')", id, record.title);

    let response = SaveRecipeResponse {
        id,
        image_url: image_url(record.image.is_some(), id),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /increment-cooked/:id
///
/// Returns the server's authoritative count; clients must display this
/// value rather than incrementing locally.
pub async fn increment_cooked(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<IncrementResponse>> {
    let times_cooked = db::increment_times_cooked(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(IncrementResponse {
        success: true,
        times_cooked,
    }))
}

/// DELETE /delete-recipe/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !db::delete_recipe(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Recipe {} not found", id)));
    }

    info!("Deleted recipe {}", id);
    Ok(Json(json!({ "message": "Recipe deleted successfully" })))
}

/// GET /get-recipe/:id
///
/// Full detail for one recipe, ingredients split back into a list.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecipeDetail>> {
    let row = db::get_recipe(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {} not found", id)))?;

    let detail = RecipeDetail {
        image_url: image_url(row.has_image, row.id),
        id: row.id,
        title: row.title,
        yields: not_available_if_empty(row.yields),
        prep_time: not_available_if_empty(row.prep_time),
        cook_time: not_available_if_empty(row.cook_time),
        times_cooked: row.times_cooked,
        ingredients: row
            .ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        instructions: row.instructions,
        category: row.category,
    };

    Ok(Json(detail))
}

fn image_url(has_image: bool, id: i64) -> Option<String> {
    has_image.then(|| format!("/image/{}", id))
}

fn not_available_if_empty(value: String) -> String {
    if value.trim().is_empty() {
        crate::scrape::NOT_AVAILABLE.to_string()
    } else {
        value
    }
}

/// Download the recipe's source image; failures log and the recipe is
/// simply saved without one
async fn download_image(client: &reqwest::Client, url: &str) -> Option<Vec<u8>> {
    let response = match client.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(e) => {
            warn!("Image download failed for {}: {}", url, e);
            return None;
        }
    };

    match response.bytes().await {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(e) => {
            warn!("Image download failed for {}: {}", url, e);
            None
        }
    }
}
