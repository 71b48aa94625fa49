//! Shared API request/response types
//!
//! The presentation layer always receives items grouped into the four fixed
//! categories, each item reduced to an [`ItemRecord`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::{ByCategory, Category};
use crate::db::models::{ClothingItem, ItemId, Outfit, OutfitId, User, UserStats};

// ========================================
// Envelope
// ========================================

/// Response envelope shared by every endpoint
///
/// ```
/// use closet_common::api::types::ApiResponse;
///
/// let body = serde_json::to_value(ApiResponse::ok(42)).unwrap();
/// assert_eq!(body["success"], true);
/// assert_eq!(body["data"], 42);
/// assert!(body.get("message").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failure with a user-facing message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

// ========================================
// Items and outfits
// ========================================

/// Item as shown inside a category bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub clean: bool,
}

impl From<ClothingItem> for ItemRecord {
    fn from(item: ClothingItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            icon: item.icon,
            color: item.color,
            clean: item.clean,
        }
    }
}

/// Single item returned outside a bucket, so it carries its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedItemRecord {
    #[serde(flatten)]
    pub item: ItemRecord,
    pub category: Category,
}

impl From<ClothingItem> for CategorizedItemRecord {
    fn from(item: ClothingItem) -> Self {
        let category = item.category;
        Self {
            item: item.into(),
            category,
        }
    }
}

/// Outfit as shown to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitView {
    pub id: OutfitId,
    pub name: String,
    pub items: ByCategory<ItemRecord>,
    pub created_at: NaiveDateTime,
}

impl From<Outfit> for OutfitView {
    fn from(outfit: Outfit) -> Self {
        let name = outfit.display_name();
        Self {
            id: outfit.id,
            name,
            items: outfit.items.map(ItemRecord::from),
            created_at: outfit.created_at,
        }
    }
}

/// Item reference in an outfit-creation request
///
/// Accepts a bare id (`3`) or an item object carrying one (`{"id": 3, ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    Id(ItemId),
    Object { id: ItemId },
}

impl ItemRef {
    pub fn id(self) -> ItemId {
        match self {
            ItemRef::Id(id) | ItemRef::Object { id } => id,
        }
    }
}

// ========================================
// Users
// ========================================

/// Public user fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Issued on register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub clothing_count: i64,
    pub outfit_count: i64,
}

impl From<UserStats> for StatsRecord {
    fn from(stats: UserStats) -> Self {
        Self {
            clothing_count: stats.clothing_count,
            outfit_count: stats.outfit_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(flatten)]
    pub user: UserRecord,
    pub stats: StatsRecord,
}
