//! Owner-scoped inventory operations and clean/dirty transitions

use crate::category::ByCategory;
use crate::db::models::{ClothingItem, ItemId, NewItem, UserId};
use crate::db::store::ItemStore;
use crate::{Error, Result};

/// Fetch an item, treating another owner's item as missing
pub async fn owned_item<S: ItemStore>(store: &S, owner: UserId, id: ItemId) -> Result<ClothingItem> {
    let item = store.get_item(id).await?;
    if item.owner != owner {
        return Err(Error::NotFound(format!("clothing item {}", id)));
    }
    Ok(item)
}

/// All items of `owner`, one bucket per category
pub async fn closet<S: ItemStore>(store: &S, owner: UserId) -> Result<ByCategory<ClothingItem>> {
    let items = store.list_items_by_owner(owner).await?;
    Ok(items.into_iter().map(|item| (item.category, item)).collect())
}

/// Add an item after checking required fields
///
/// Icon and color are required; the description may be empty. Surrounding
/// whitespace is trimmed from every field.
pub async fn add_item<S: ItemStore>(store: &S, owner: UserId, item: NewItem) -> Result<ClothingItem> {
    let item = NewItem {
        category: item.category,
        description: item.description.trim().to_string(),
        icon: item.icon.trim().to_string(),
        color: item.color.trim().to_string(),
    };

    if item.icon.is_empty() {
        return Err(Error::Validation("Icon is required".to_string()));
    }
    if item.color.is_empty() {
        return Err(Error::Validation("Color is required".to_string()));
    }

    store.create_item(owner, &item).await
}

/// Remove an item; it disappears from every outfit that referenced it
pub async fn remove_item<S: ItemStore>(store: &S, owner: UserId, id: ItemId) -> Result<()> {
    owned_item(store, owner, id).await?;
    store.delete_item(id).await
}

/// Move an item to the requested state
///
/// Requesting the state an item is already in performs no write.
pub async fn set_status<S: ItemStore>(
    store: &S,
    owner: UserId,
    id: ItemId,
    clean: bool,
) -> Result<ClothingItem> {
    let mut item = owned_item(store, owner, id).await?;
    if item.clean != clean {
        store.set_clean(id, clean).await?;
        item.clean = clean;
    }
    Ok(item)
}

pub async fn mark_clean<S: ItemStore>(store: &S, owner: UserId, id: ItemId) -> Result<ClothingItem> {
    set_status(store, owner, id, true).await
}

pub async fn mark_dirty<S: ItemStore>(store: &S, owner: UserId, id: ItemId) -> Result<ClothingItem> {
    set_status(store, owner, id, false).await
}

/// Mark every item of `owner` clean regardless of current state
pub async fn clean_all<S: ItemStore>(store: &S, owner: UserId) -> Result<u64> {
    store.set_clean_all_for_owner(owner).await
}
