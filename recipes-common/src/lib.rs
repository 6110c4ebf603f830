//! # Recipes Common Library
//!
//! Shared code for the recipe manager services including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Database initialization, schema, and migrations
//! - Record models shared between server and gallery client

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
