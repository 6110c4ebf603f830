//! recipes-web library - recipe manager web service
//!
//! HTTP server exposing the recipe CRUD API, the recipe fetcher, and the
//! embedded browser UI.

use axum::Router;
use sqlx::SqlitePool;

use crate::classify::Classifier;

pub mod api;
pub mod classify;
pub mod db;
pub mod error;
pub mod scrape;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Outbound HTTP client (page fetches, image downloads)
    pub http: reqwest::Client,
    /// Optional ingredient-based category classifier
    pub classifier: Option<Classifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, http: reqwest::Client, classifier: Option<Classifier>) -> Self {
        Self {
            db,
            http,
            classifier,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    // JSON API
    let api_routes = Router::new()
        .route("/fetch-recipe", get(api::fetch_recipe))
        .route("/get-recipes", get(api::list_recipes))
        .route("/save-recipe", post(api::save_recipe))
        .route("/increment-cooked/:id", post(api::increment_cooked))
        .route("/delete-recipe/:id", delete(api::delete_recipe))
        .route("/get-recipe/:id", get(api::get_recipe))
        .route("/image/:id", get(api::get_image));

    // HTML pages and static assets (embedded at compile time)
    let pages = Router::new()
        .route("/", get(api::serve_index))
        .route("/recipes", get(api::serve_recipes_page))
        .route("/recipes/:id", get(api::serve_recipe_detail_page))
        .route("/static/gallery.js", get(api::serve_gallery_js))
        .route("/static/detail.js", get(api::serve_detail_js))
        .route("/static/style.css", get(api::serve_style_css))
        .merge(api::health_routes());

    Router::new().merge(api_routes).merge(pages).with_state(state)
}
