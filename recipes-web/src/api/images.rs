//! Stored image serving

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::db::recipes as db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /image/:id
///
/// Serves the image bytes stored with the recipe.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let image = db::get_image(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No image for recipe {}", id)))?;

    Ok((StatusCode::OK, [("content-type", "image/png")], image).into_response())
}
