//! Outfit assembler
//!
//! Turns a client's category -> item-id submission into a persisted outfit
//! that references only items the owner actually has.

use std::collections::HashSet;

use crate::category::ByCategory;
use crate::db::models::{ItemId, Outfit, OutfitId, UserId};
use crate::db::store::{ItemStore, OutfitStore};
use crate::{Error, Result};

/// Result of assembling an outfit
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub outfit: Outfit,
    /// Submitted ids that were missing or owned by someone else
    pub dropped: Vec<ItemId>,
}

/// Verify and persist a new outfit for `owner`
///
/// Ids that do not resolve to one of the owner's items are dropped rather
/// than failing the request, and repeated ids are collapsed. Items are
/// placed in the bucket of their stored category; the bucket they were
/// submitted under is only used to walk the input. Fails with
/// `Error::Validation` when nothing remains to save.
pub async fn assemble_outfit<S>(
    store: &S,
    owner: UserId,
    name: Option<&str>,
    submitted: &ByCategory<ItemId>,
) -> Result<Assembled>
where
    S: ItemStore + OutfitStore,
{
    if submitted.is_empty() {
        return Err(Error::Validation(
            "At least one clothing item is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut verified = Vec::new();
    let mut dropped = Vec::new();

    for (_, &id) in submitted.iter() {
        if !seen.insert(id) {
            continue;
        }

        match store.get_item(id).await {
            Ok(item) if item.owner == owner => verified.push(item),
            Ok(_) | Err(Error::NotFound(_)) => dropped.push(id),
            Err(e) => return Err(e),
        }
    }

    if verified.is_empty() {
        return Err(Error::Validation(
            "Outfit must contain at least one of your clothing items".to_string(),
        ));
    }

    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let ids: Vec<ItemId> = verified.iter().map(|item| item.id).collect();
    let skeleton = store.create_outfit(owner, name, &ids).await?;

    Ok(Assembled {
        outfit: Outfit {
            id: skeleton.id,
            owner: skeleton.owner,
            name: skeleton.name,
            items: verified.into_iter().map(|item| (item.category, item)).collect(),
            created_at: skeleton.created_at,
        },
        dropped,
    })
}

/// Delete one of `owner`'s outfits; the items themselves are untouched
pub async fn remove_outfit<S: OutfitStore>(store: &S, owner: UserId, id: OutfitId) -> Result<()> {
    let outfit = store.get_outfit(id).await?;
    if outfit.owner != owner {
        return Err(Error::NotFound(format!("outfit {}", id)));
    }
    store.delete_outfit(id).await
}
