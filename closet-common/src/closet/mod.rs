//! Closet core: inventory, outfit assembly and outfit selection
//!
//! Everything here is written against the [`ItemStore`](crate::db::ItemStore)
//! and [`OutfitStore`](crate::db::OutfitStore) traits and never logs or
//! formats user-facing messages; that is the HTTP layer's job.

pub mod assembler;
pub mod filter;
pub mod items;
pub mod query;
pub mod selector;

pub use assembler::{assemble_outfit, remove_outfit, Assembled};
pub use filter::wearable_outfits;
pub use items::{
    add_item, clean_all, closet, mark_clean, mark_dirty, owned_item, remove_item, set_status,
};
pub use query::{list_outfits, materialize, random_wearable_outfit, random_wearable_outfit_with};
pub use selector::{pick, pick_with};
