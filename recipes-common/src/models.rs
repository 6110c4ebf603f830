//! Shared request/response models
//!
//! JSON shapes exchanged between the web service and the gallery client.

use serde::{Deserialize, Serialize};

/// Structured recipe payload produced by the fetcher and accepted by
/// POST /save-recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedRecipe {
    pub title: String,
    /// Source image URL (downloaded and stored by the server at save time)
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub yields: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
}

/// One entry of GET /get-recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub times_cooked: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Full record returned by GET /get-recipe/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub yields: String,
    pub prep_time: String,
    pub cook_time: String,
    pub times_cooked: i64,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Response of POST /save-recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecipeResponse {
    pub id: i64,
    pub image_url: Option<String>,
}

/// Response of POST /increment-cooked/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementResponse {
    pub success: bool,
    pub times_cooked: i64,
}
