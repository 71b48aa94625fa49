//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::{ByCategory, Category};

pub type UserId = i64;
pub type ItemId = i64;
pub type OutfitId = i64;

/// A single piece of clothing owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    pub owner: UserId,
    pub category: Category,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub clean: bool,
    pub created_at: NaiveDateTime,
}

/// Fields required to create a [`ClothingItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub category: Category,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Outfit as persisted: item references only, no item state
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitSkeleton {
    pub id: OutfitId,
    pub owner: UserId,
    pub name: Option<String>,
    /// Referenced items in submission order
    pub item_ids: Vec<ItemId>,
    pub created_at: NaiveDateTime,
}

/// Outfit with every referenced item resolved to its current state
#[derive(Debug, Clone, PartialEq)]
pub struct Outfit {
    pub id: OutfitId,
    pub owner: UserId,
    pub name: Option<String>,
    pub items: ByCategory<ClothingItem>,
    pub created_at: NaiveDateTime,
}

impl Outfit {
    /// True iff every referenced item is currently clean
    ///
    /// An outfit without items is vacuously wearable.
    pub fn is_wearable(&self) -> bool {
        self.items.iter().all(|(_, item)| item.clean)
    }

    /// Name shown to users, falling back to "Outfit <id>"
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Outfit {}", self.id))
    }
}

/// Registered user (never carries password material)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

/// Inventory counts shown on the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub clothing_count: i64,
    pub outfit_count: i64,
}
