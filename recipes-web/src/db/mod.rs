//! Database access for recipes-web

pub mod recipes;
