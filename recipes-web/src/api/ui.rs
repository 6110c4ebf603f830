//! UI serving routes
//!
//! Serves the browser UI, embedded at compile time.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const RECIPES_HTML: &str = include_str!("../ui/recipes.html");
const DETAIL_HTML: &str = include_str!("../ui/recipe-detail.html");
const GALLERY_JS: &str = include_str!("../ui/gallery.js");
const DETAIL_JS: &str = include_str!("../ui/detail.js");
const STYLE_CSS: &str = include_str!("../ui/style.css");

/// GET /
///
/// Serves the landing page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /recipes
///
/// Serves the gallery page
pub async fn serve_recipes_page() -> Html<&'static str> {
    Html(RECIPES_HTML)
}

/// GET /recipes/:id
///
/// Serves the detail page shell; the script fills it from GET /get-recipe/:id
pub async fn serve_recipe_detail_page(Path(_id): Path<i64>) -> Html<&'static str> {
    Html(DETAIL_HTML)
}

/// GET /static/gallery.js
pub async fn serve_gallery_js() -> Response {
    js_response(GALLERY_JS)
}

/// GET /static/detail.js
pub async fn serve_detail_js() -> Response {
    js_response(DETAIL_JS)
}

/// GET /static/style.css
pub async fn serve_style_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        STYLE_CSS,
    )
        .into_response()
}

fn js_response(body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}
