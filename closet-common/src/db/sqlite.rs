//! SQLite-backed implementation of the item and outfit stores

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::models::{ClothingItem, ItemId, NewItem, OutfitId, OutfitSkeleton, UserId};
use super::store::{ItemStore, OutfitStore};
use crate::category::Category;
use crate::{Error, Result};

const ITEM_COLUMNS: &str =
    "id, user_id, category, description, icon, color, is_clean, created_at";

/// Store over a SQLite connection pool
///
/// Cheap to clone; all clones share the pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of outfits owned by `owner`
    pub async fn count_outfits(&self, owner: UserId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM outfits WHERE user_id = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of clothing items owned by `owner`
    pub async fn count_items(&self, owner: UserId) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM clothing_items WHERE user_id = ?")
                .bind(owner)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

fn item_from_row(row: &SqliteRow) -> Result<ClothingItem> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<Category>()
        .map_err(|_| Error::Internal(format!("Unknown category in database: {}", category)))?;

    Ok(ClothingItem {
        id: row.try_get("id")?,
        owner: row.try_get("user_id")?,
        category,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        clean: row.try_get("is_clean")?,
        created_at: row.try_get("created_at")?,
    })
}

impl ItemStore for SqliteStore {
    async fn list_items_by_owner(&self, owner: UserId) -> Result<Vec<ClothingItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM clothing_items WHERE user_id = ? \
             ORDER BY category, created_at DESC, id DESC",
            ITEM_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    async fn get_item(&self, id: ItemId) -> Result<ClothingItem> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM clothing_items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("clothing item {}", id)))?;

        item_from_row(&row)
    }

    async fn set_clean(&self, id: ItemId, clean: bool) -> Result<()> {
        let result = sqlx::query(
            "UPDATE clothing_items SET is_clean = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(clean)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("clothing item {}", id)));
        }

        debug!("Clothing item {} marked {}", id, if clean { "clean" } else { "dirty" });
        Ok(())
    }

    async fn set_clean_all_for_owner(&self, owner: UserId) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE clothing_items SET is_clean = 1, updated_at = CURRENT_TIMESTAMP WHERE user_id = ?",
        )
        .bind(owner)
        .execute(&self.pool)
        .await?;

        debug!("Marked {} clothing items clean for user {}", result.rows_affected(), owner);
        Ok(result.rows_affected())
    }

    async fn create_item(&self, owner: UserId, item: &NewItem) -> Result<ClothingItem> {
        let result = sqlx::query(
            r#"
            INSERT INTO clothing_items (user_id, category, description, icon, color, is_clean)
            VALUES (?, ?, ?, ?, ?, 1)
            "#,
        )
        .bind(owner)
        .bind(item.category.as_str())
        .bind(&item.description)
        .bind(&item.icon)
        .bind(&item.color)
        .execute(&self.pool)
        .await?;

        self.get_item(result.last_insert_rowid()).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<()> {
        // outfit_items rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM clothing_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("clothing item {}", id)));
        }
        Ok(())
    }
}

impl OutfitStore for SqliteStore {
    async fn list_outfits_by_owner(&self, owner: UserId) -> Result<Vec<OutfitSkeleton>> {
        let outfit_rows: Vec<(OutfitId, UserId, Option<String>, NaiveDateTime)> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, created_at
            FROM outfits
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        // One pass over every association of this owner instead of a query per outfit
        let links: Vec<(OutfitId, ItemId)> = sqlx::query_as(
            r#"
            SELECT oi.outfit_id, oi.clothing_item_id
            FROM outfit_items oi
            JOIN outfits o ON oi.outfit_id = o.id
            WHERE o.user_id = ?
            ORDER BY oi.outfit_id, oi.position
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_outfit: HashMap<OutfitId, Vec<ItemId>> = HashMap::new();
        for (outfit_id, item_id) in links {
            items_by_outfit.entry(outfit_id).or_default().push(item_id);
        }

        Ok(outfit_rows
            .into_iter()
            .map(|(id, owner, name, created_at)| OutfitSkeleton {
                id,
                owner,
                name,
                item_ids: items_by_outfit.remove(&id).unwrap_or_default(),
                created_at,
            })
            .collect())
    }

    async fn get_outfit(&self, id: OutfitId) -> Result<OutfitSkeleton> {
        let (id, owner, name, created_at): (OutfitId, UserId, Option<String>, NaiveDateTime) =
            sqlx::query_as("SELECT id, user_id, name, created_at FROM outfits WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound(format!("outfit {}", id)))?;

        let item_ids: Vec<ItemId> = sqlx::query_scalar(
            "SELECT clothing_item_id FROM outfit_items WHERE outfit_id = ? ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OutfitSkeleton {
            id,
            owner,
            name,
            item_ids,
            created_at,
        })
    }

    async fn create_outfit(
        &self,
        owner: UserId,
        name: Option<&str>,
        item_ids: &[ItemId],
    ) -> Result<OutfitSkeleton> {
        // Dropping the transaction on any error rolls everything back
        let mut tx = self.pool.begin().await?;

        let outfit_id = sqlx::query("INSERT INTO outfits (user_id, name) VALUES (?, ?)")
            .bind(owner)
            .bind(name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for (position, item_id) in item_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO outfit_items (outfit_id, clothing_item_id, position) VALUES (?, ?, ?)",
            )
            .bind(outfit_id)
            .bind(item_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Created outfit {} with {} items for user {}", outfit_id, item_ids.len(), owner);

        self.get_outfit(outfit_id).await
    }

    async fn delete_outfit(&self, id: OutfitId) -> Result<()> {
        let result = sqlx::query("DELETE FROM outfits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("outfit {}", id)));
        }
        Ok(())
    }
}
