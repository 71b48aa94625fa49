//! API module for shared HTTP API functionality
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared request/response types
//!
//! The server crate wraps these with Axum handlers and middleware.

pub mod auth;
pub mod types;

pub use auth::{
    generate_session_token, hash_password, validate_email, validate_registration, verify_password,
    PASSWORD_HASH_COST,
};
pub use types::{
    ApiResponse, CategorizedItemRecord, ItemRecord, ItemRef, OutfitView, ProfileRecord,
    SessionRecord, StatsRecord, UserRecord,
};
