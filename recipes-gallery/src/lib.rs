//! recipes-gallery - typed gallery controller
//!
//! Client-side logic for the recipe gallery as an explicit model plus a
//! one-way render function: the controller mirrors server state into a
//! typed card collection and translates the three user gestures (submit
//! URL, cooked, delete) into server requests. The browser page served by
//! recipes-web implements the same contract in script form; this crate is
//! the canonical, testable statement of it.

pub mod api;
pub mod controller;
pub mod model;

pub use api::{ApiClientError, HttpRecipeApi, RecipeApi};
pub use controller::GalleryController;
pub use model::{Card, GalleryModel};
