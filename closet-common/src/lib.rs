//! # Closet Common Library
//!
//! Shared code for the closet service:
//! - Clothing categories and the four-bucket grouping
//! - Database models, schema and the SQLite store
//! - Closet core (inventory, outfit assembly, wearable-outfit selection)
//! - API request/response types and password/session helpers
//! - Configuration loading

pub mod api;
pub mod category;
pub mod closet;
pub mod config;
pub mod db;
pub mod error;

pub use category::{ByCategory, Category};
pub use error::{Error, Result};
