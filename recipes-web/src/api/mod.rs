//! HTTP API handlers for recipes-web

pub mod fetch;
pub mod health;
pub mod images;
pub mod recipes;
pub mod ui;

pub use fetch::fetch_recipe;
pub use health::health_routes;
pub use images::get_image;
pub use recipes::{delete_recipe, get_recipe, increment_cooked, list_recipes, save_recipe};
pub use ui::{
    serve_detail_js, serve_gallery_js, serve_index, serve_recipe_detail_page,
    serve_recipes_page, serve_style_css,
};
