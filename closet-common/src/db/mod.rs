//! Database models, schema and stores

pub mod init;
pub mod models;
pub mod sqlite;
pub mod store;
mod users;

pub use init::*;
pub use models::*;
pub use sqlite::SqliteStore;
pub use store::{ItemStore, OutfitStore};
