//! Database access layer shared by the recipe manager services

mod init;
pub mod migrations;

pub use init::{init_database, init_memory_database};
