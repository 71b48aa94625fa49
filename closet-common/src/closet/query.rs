//! Outfit query service
//!
//! Reassembles stored outfits from current item state and answers the
//! "what should I wear" question.

use std::collections::HashMap;

use rand::Rng;

use super::filter::wearable_outfits;
use super::selector::pick_with;
use crate::db::models::{ClothingItem, ItemId, Outfit, OutfitSkeleton, UserId};
use crate::db::store::{ItemStore, OutfitStore};
use crate::{Error, Result};

/// Resolve skeletons against the owner's current items
///
/// Each item lands in the bucket of its stored category. References to
/// items missing from `items` are skipped.
pub fn materialize(skeletons: Vec<OutfitSkeleton>, items: &[ClothingItem]) -> Vec<Outfit> {
    let by_id: HashMap<ItemId, &ClothingItem> = items.iter().map(|item| (item.id, item)).collect();

    skeletons
        .into_iter()
        .map(|skeleton| Outfit {
            id: skeleton.id,
            owner: skeleton.owner,
            name: skeleton.name,
            items: skeleton
                .item_ids
                .iter()
                .filter_map(|id| by_id.get(id))
                .map(|item| (item.category, (*item).clone()))
                .collect(),
            created_at: skeleton.created_at,
        })
        .collect()
}

/// Every outfit of `owner`, fully materialized, most recently created first
pub async fn list_outfits<S>(store: &S, owner: UserId) -> Result<Vec<Outfit>>
where
    S: ItemStore + OutfitStore,
{
    let skeletons = store.list_outfits_by_owner(owner).await?;
    if skeletons.is_empty() {
        return Ok(Vec::new());
    }

    let items = store.list_items_by_owner(owner).await?;
    Ok(materialize(skeletons, &items))
}

/// A uniformly random outfit of `owner` made only of clean items
///
/// Fails with `Error::NotFound` when no outfit is currently wearable,
/// whether because none exist or because each has a dirty item.
pub async fn random_wearable_outfit<S>(store: &S, owner: UserId) -> Result<Outfit>
where
    S: ItemStore + OutfitStore,
{
    let candidates = wearable_outfits(list_outfits(store, owner).await?);
    choose_outfit(candidates, &mut rand::thread_rng())
}

/// Like [`random_wearable_outfit`] with a caller-supplied RNG
pub async fn random_wearable_outfit_with<S, R>(
    store: &S,
    owner: UserId,
    rng: &mut R,
) -> Result<Outfit>
where
    S: ItemStore + OutfitStore,
    R: Rng,
{
    let candidates = wearable_outfits(list_outfits(store, owner).await?);
    choose_outfit(candidates, rng)
}

fn choose_outfit<R: Rng>(candidates: Vec<Outfit>, rng: &mut R) -> Result<Outfit> {
    if candidates.is_empty() {
        return Err(Error::NotFound("no wearable outfit".to_string()));
    }
    pick_with(&candidates, rng).cloned()
}
