//! Store interfaces consumed by the closet core
//!
//! The core only ever talks to persistence through these traits. Each
//! method is atomic from the caller's point of view; `create_outfit` in
//! particular must record every association or none of them.

use std::future::Future;

use super::models::{ClothingItem, ItemId, NewItem, OutfitId, OutfitSkeleton, UserId};
use crate::Result;

/// Clothing item persistence
pub trait ItemStore: Send + Sync {
    /// All items of `owner`, grouped by category then newest first
    fn list_items_by_owner(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<ClothingItem>>> + Send;

    /// Fails with `Error::NotFound` when no item has this id
    fn get_item(&self, id: ItemId) -> impl Future<Output = Result<ClothingItem>> + Send;

    fn set_clean(&self, id: ItemId, clean: bool) -> impl Future<Output = Result<()>> + Send;

    /// Marks every item of `owner` clean; returns the number of rows touched
    fn set_clean_all_for_owner(&self, owner: UserId) -> impl Future<Output = Result<u64>> + Send;

    /// New items start out clean
    fn create_item(
        &self,
        owner: UserId,
        item: &NewItem,
    ) -> impl Future<Output = Result<ClothingItem>> + Send;

    /// Removes the item and every outfit association referencing it
    fn delete_item(&self, id: ItemId) -> impl Future<Output = Result<()>> + Send;
}

/// Outfit persistence
pub trait OutfitStore: Send + Sync {
    /// Skeletons of every outfit of `owner`, most recently created first
    fn list_outfits_by_owner(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<OutfitSkeleton>>> + Send;

    /// Fails with `Error::NotFound` when no outfit has this id
    fn get_outfit(&self, id: OutfitId) -> impl Future<Output = Result<OutfitSkeleton>> + Send;

    /// Atomically creates the outfit and all of its item associations
    fn create_outfit(
        &self,
        owner: UserId,
        name: Option<&str>,
        item_ids: &[ItemId],
    ) -> impl Future<Output = Result<OutfitSkeleton>> + Send;

    fn delete_outfit(&self, id: OutfitId) -> impl Future<Output = Result<()>> + Send;
}
