//! HTTP API handlers for closet-server

pub mod account;
pub mod auth;
pub mod clothing;
pub mod error;
pub mod health;
pub mod outfits;

pub use account::{
    change_password, delete_account, get_profile, login, logout, me, register, update_profile,
};
pub use auth::{auth_middleware, AuthUser};
pub use clothing::{
    add_clothing, clean_all_clothing, delete_clothing, list_clothing, update_clothing_status,
};
pub use error::ApiError;
pub use health::health_routes;
pub use outfits::{create_outfit, delete_outfit, list_outfits, random_outfit};
