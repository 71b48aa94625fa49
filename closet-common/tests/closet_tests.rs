//! Closet core behavior against the SQLite store
//!
//! Covers:
//! - Random wearable outfit only ever returns all-clean outfits
//! - NotFound when every outfit has a dirty item
//! - Idempotent clean/dirty transitions
//! - Outfit creation ownership checks, dropped ids and atomicity
//! - Listings reflect current item state, not creation-time state
//! - Cascade of item deletion out of outfits

use closet_common::closet;
use closet_common::db::{init_memory_database, ItemStore, NewItem, OutfitStore, SqliteStore, User};
use closet_common::{ByCategory, Category, Error};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Test helper: fresh in-memory store
async fn setup_store() -> SqliteStore {
    let pool = init_memory_database()
        .await
        .expect("Should create in-memory database");
    SqliteStore::new(pool)
}

async fn add_user(store: &SqliteStore, name: &str) -> User {
    store
        .create_user(name, &format!("{}@example.com", name), "password")
        .await
        .expect("Should create user")
}

async fn add(store: &SqliteStore, owner: i64, category: Category, description: &str) -> i64 {
    closet::add_item(
        store,
        owner,
        NewItem {
            category,
            description: description.to_string(),
            icon: "icon".to_string(),
            color: "navy".to_string(),
        },
    )
    .await
    .expect("Should add item")
    .id
}

fn tops(ids: &[i64]) -> ByCategory<i64> {
    ByCategory {
        tops: ids.to_vec(),
        ..ByCategory::new()
    }
}

// =============================================================================
// Item status transitions
// =============================================================================

#[tokio::test]
async fn test_new_items_start_clean() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let id = add(&store, user.id, Category::Tops, "white tee").await;
    let item = store.get_item(id).await.unwrap();

    assert!(item.clean);
    assert_eq!(item.category, Category::Tops);
    assert_eq!(item.owner, user.id);
}

#[tokio::test]
async fn test_mark_dirty_twice_is_unchanged() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let id = add(&store, user.id, Category::Bottoms, "jeans").await;

    let first = closet::mark_dirty(&store, user.id, id).await.unwrap();
    let second = closet::mark_dirty(&store, user.id, id).await.unwrap();

    assert!(!first.clean);
    assert_eq!(first, second);
    assert!(!store.get_item(id).await.unwrap().clean);
}

#[tokio::test]
async fn test_clean_all_is_idempotent() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let a = add(&store, user.id, Category::Tops, "shirt").await;
    let b = add(&store, user.id, Category::Shoes, "boots").await;
    closet::mark_dirty(&store, user.id, a).await.unwrap();
    closet::mark_dirty(&store, user.id, b).await.unwrap();

    closet::clean_all(&store, user.id).await.unwrap();
    let once = store.list_items_by_owner(user.id).await.unwrap();

    closet::clean_all(&store, user.id).await.unwrap();
    let twice = store.list_items_by_owner(user.id).await.unwrap();

    assert!(once.iter().all(|item| item.clean));
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_clean_all_only_touches_owner() {
    let store = setup_store().await;
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    let bobs = add(&store, bob.id, Category::Tops, "hoodie").await;
    closet::mark_dirty(&store, bob.id, bobs).await.unwrap();

    closet::clean_all(&store, alice.id).await.unwrap();

    assert!(!store.get_item(bobs).await.unwrap().clean);
}

#[tokio::test]
async fn test_status_change_on_foreign_item_is_not_found() {
    let store = setup_store().await;
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    let bobs = add(&store, bob.id, Category::Tops, "hoodie").await;

    let result = closet::mark_dirty(&store, alice.id, bobs).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(store.get_item(bobs).await.unwrap().clean);
}

#[tokio::test]
async fn test_add_item_requires_icon_and_color() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let missing_icon = closet::add_item(
        &store,
        user.id,
        NewItem {
            category: Category::Tops,
            description: "shirt".to_string(),
            icon: "   ".to_string(),
            color: "red".to_string(),
        },
    )
    .await;
    assert!(matches!(missing_icon, Err(Error::Validation(_))));

    let missing_color = closet::add_item(
        &store,
        user.id,
        NewItem {
            category: Category::Tops,
            description: String::new(),
            icon: "shirt".to_string(),
            color: String::new(),
        },
    )
    .await;
    assert!(matches!(missing_color, Err(Error::Validation(_))));

    assert!(store.list_items_by_owner(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closet_groups_by_category() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    add(&store, user.id, Category::Tops, "shirt").await;
    add(&store, user.id, Category::Tops, "polo").await;
    add(&store, user.id, Category::Shoes, "sneakers").await;

    let grouped = closet::closet(&store, user.id).await.unwrap();

    assert_eq!(grouped.tops.len(), 2);
    assert_eq!(grouped.shoes.len(), 1);
    assert!(grouped.bottoms.is_empty());
    assert!(grouped.accessories.is_empty());
    // Newest first within a bucket
    assert_eq!(grouped.tops[0].description, "polo");
}

// =============================================================================
// Outfit assembly
// =============================================================================

#[tokio::test]
async fn test_foreign_and_missing_ids_are_dropped() {
    let store = setup_store().await;
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    let one = add(&store, alice.id, Category::Tops, "shirt").await;
    let two = add(&store, alice.id, Category::Bottoms, "chinos").await;
    let foreign = add(&store, bob.id, Category::Tops, "bob's shirt").await;

    let submitted = ByCategory {
        tops: vec![one, foreign, 9_999],
        bottoms: vec![two],
        ..ByCategory::new()
    };

    let assembled = closet::assemble_outfit(&store, alice.id, Some("Work"), &submitted)
        .await
        .unwrap();

    assert_eq!(assembled.dropped, vec![foreign, 9_999]);
    let mut ids: Vec<_> = assembled.outfit.items.iter().map(|(_, i)| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec![one, two]);

    let stored = store.get_outfit(assembled.outfit.id).await.unwrap();
    assert_eq!(stored.item_ids, vec![one, two]);
    assert_eq!(stored.name.as_deref(), Some("Work"));
}

#[tokio::test]
async fn test_outfit_with_no_valid_items_is_rejected() {
    let store = setup_store().await;
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    let foreign = add(&store, bob.id, Category::Tops, "bob's shirt").await;

    let result = closet::assemble_outfit(&store, alice.id, None, &tops(&[foreign, 12_345])).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let empty = closet::assemble_outfit(&store, alice.id, None, &ByCategory::new()).await;
    assert!(matches!(empty, Err(Error::Validation(_))));

    assert!(store.list_outfits_by_owner(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_items_land_in_their_stored_category() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shoes = add(&store, user.id, Category::Shoes, "loafers").await;

    // Submitted under the wrong bucket
    let assembled = closet::assemble_outfit(&store, user.id, None, &tops(&[shoes]))
        .await
        .unwrap();

    assert!(assembled.outfit.items.tops.is_empty());
    assert_eq!(assembled.outfit.items.shoes[0].id, shoes);

    let listed = closet::list_outfits(&store, user.id).await.unwrap();
    assert_eq!(listed[0].items.shoes[0].id, shoes);
}

#[tokio::test]
async fn test_duplicate_ids_collapsed() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;

    let submitted = ByCategory {
        tops: vec![shirt, shirt],
        accessories: vec![shirt],
        ..ByCategory::new()
    };
    let assembled = closet::assemble_outfit(&store, user.id, None, &submitted)
        .await
        .unwrap();

    assert_eq!(assembled.outfit.items.len(), 1);
    assert!(assembled.dropped.is_empty());
}

#[tokio::test]
async fn test_blank_name_stored_as_none() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;

    let assembled = closet::assemble_outfit(&store, user.id, Some("   "), &tops(&[shirt]))
        .await
        .unwrap();

    assert_eq!(assembled.outfit.name, None);
    assert_eq!(
        assembled.outfit.display_name(),
        format!("Outfit {}", assembled.outfit.id)
    );
}

#[tokio::test]
async fn test_failed_outfit_insert_leaves_nothing_behind() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;

    // Second association violates the foreign key, so the whole outfit must roll back
    let result = store.create_outfit(user.id, Some("broken"), &[shirt, 424_242]).await;
    assert!(matches!(result, Err(Error::Database(_))));

    assert!(store.list_outfits_by_owner(user.id).await.unwrap().is_empty());
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM outfit_items")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(links, 0);
}

// =============================================================================
// Outfit queries
// =============================================================================

#[tokio::test]
async fn test_only_clean_outfit_is_ever_chosen() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let a = add(&store, user.id, Category::Tops, "A").await;
    let b = add(&store, user.id, Category::Bottoms, "B").await;
    closet::mark_dirty(&store, user.id, b).await.unwrap();

    let outfit1 = closet::assemble_outfit(&store, user.id, Some("Outfit1"), &tops(&[a]))
        .await
        .unwrap()
        .outfit;
    let both = ByCategory {
        tops: vec![a],
        bottoms: vec![b],
        ..ByCategory::new()
    };
    closet::assemble_outfit(&store, user.id, Some("Outfit2"), &both)
        .await
        .unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..25 {
        let chosen = closet::random_wearable_outfit_with(&store, user.id, &mut rng)
            .await
            .unwrap();
        assert_eq!(chosen.id, outfit1.id);
        assert!(chosen.is_wearable());
    }
}

#[tokio::test]
async fn test_random_outfit_always_all_clean() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;
    let tee = add(&store, user.id, Category::Tops, "tee").await;
    let jeans = add(&store, user.id, Category::Bottoms, "jeans").await;
    let boots = add(&store, user.id, Category::Shoes, "boots").await;
    closet::mark_dirty(&store, user.id, boots).await.unwrap();

    for ids in [vec![shirt, jeans], vec![tee, jeans], vec![shirt, boots], vec![tee, boots]] {
        closet::assemble_outfit(&store, user.id, None, &tops(&ids))
            .await
            .unwrap();
    }

    for _ in 0..50 {
        let chosen = closet::random_wearable_outfit(&store, user.id).await.unwrap();
        assert!(chosen.items.iter().all(|(_, item)| item.clean));
    }
}

#[tokio::test]
async fn test_all_dirty_is_not_found() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;
    let jeans = add(&store, user.id, Category::Bottoms, "jeans").await;
    closet::assemble_outfit(&store, user.id, None, &tops(&[shirt])).await.unwrap();
    closet::assemble_outfit(&store, user.id, None, &tops(&[shirt, jeans])).await.unwrap();
    closet::mark_dirty(&store, user.id, shirt).await.unwrap();

    let result = closet::random_wearable_outfit(&store, user.id).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_no_outfits_is_not_found() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let result = closet::random_wearable_outfit(&store, user.id).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_listing_reflects_current_cleanliness() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;
    let jeans = add(&store, user.id, Category::Bottoms, "jeans").await;

    let submitted = ByCategory {
        tops: vec![shirt],
        bottoms: vec![jeans],
        ..ByCategory::new()
    };
    let created = closet::assemble_outfit(&store, user.id, None, &submitted)
        .await
        .unwrap()
        .outfit;
    assert!(created.is_wearable());

    closet::mark_dirty(&store, user.id, jeans).await.unwrap();

    let listed = closet::list_outfits(&store, user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    let outfit = &listed[0];
    assert_eq!(outfit.id, created.id);
    assert_eq!(outfit.items.tops[0].id, shirt);
    assert!(outfit.items.tops[0].clean);
    assert_eq!(outfit.items.bottoms[0].id, jeans);
    assert!(!outfit.items.bottoms[0].clean, "cleanliness must be read from current state");
    assert!(!outfit.is_wearable());
}

#[tokio::test]
async fn test_outfits_listed_newest_first() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;

    let mut created = Vec::new();
    for _ in 0..3 {
        let outfit = closet::assemble_outfit(&store, user.id, None, &tops(&[shirt]))
            .await
            .unwrap()
            .outfit;
        created.push(outfit.id);
    }

    let listed: Vec<_> = closet::list_outfits(&store, user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    created.reverse();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_deleting_item_removes_it_from_outfits() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;
    let jeans = add(&store, user.id, Category::Bottoms, "jeans").await;
    let submitted = ByCategory {
        tops: vec![shirt],
        bottoms: vec![jeans],
        ..ByCategory::new()
    };
    let outfit = closet::assemble_outfit(&store, user.id, None, &submitted)
        .await
        .unwrap()
        .outfit;

    closet::remove_item(&store, user.id, jeans).await.unwrap();

    let stored = store.get_outfit(outfit.id).await.unwrap();
    assert_eq!(stored.item_ids, vec![shirt]);
}

#[tokio::test]
async fn test_remove_outfit_checks_owner_and_keeps_items() {
    let store = setup_store().await;
    let alice = add_user(&store, "alice").await;
    let bob = add_user(&store, "bob").await;
    let shirt = add(&store, alice.id, Category::Tops, "shirt").await;
    let outfit = closet::assemble_outfit(&store, alice.id, None, &tops(&[shirt]))
        .await
        .unwrap()
        .outfit;

    let foreign = closet::remove_outfit(&store, bob.id, outfit.id).await;
    assert!(matches!(foreign, Err(Error::NotFound(_))));

    closet::remove_outfit(&store, alice.id, outfit.id).await.unwrap();
    assert!(store.list_outfits_by_owner(alice.id).await.unwrap().is_empty());
    assert!(store.get_item(shirt).await.is_ok());
}

// =============================================================================
// Users and sessions
// =============================================================================

#[tokio::test]
async fn test_sessions_round_trip_and_expire() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let token = store.create_session(user.id, 3600).await.unwrap();
    assert_eq!(store.resolve_session(&token).await.unwrap().id, user.id);

    let expired = store.create_session(user.id, -1).await.unwrap();
    assert!(matches!(
        store.resolve_session(&expired).await,
        Err(Error::Unauthorized(_))
    ));

    store.delete_session(&token).await.unwrap();
    assert!(store.resolve_session(&token).await.is_err());
}

#[tokio::test]
async fn test_new_session_purges_expired_rows() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    for _ in 0..50 {
        store.create_session(user.id, -1).await.unwrap();
    }

    let token = store.create_session(user.id, 3600).await.unwrap();
    assert_eq!(store.resolve_session(&token).await.unwrap().id, user.id);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn test_huge_session_ttl_saturates() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let token = store.create_session(user.id, i64::MAX).await.unwrap();
    assert_eq!(store.resolve_session(&token).await.unwrap().id, user.id);

    let expires_at: i64 = sqlx::query_scalar("SELECT expires_at FROM sessions WHERE token = ?")
        .bind(&token)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(expires_at, i64::MAX);
}

#[tokio::test]
async fn test_password_stored_as_bcrypt_hash() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert!(hash.starts_with("$2b$10$"));
    assert!(!hash.contains("password"));

    store.change_password(user.id, "password", "fresh").await.unwrap();
    assert!(store.verify_credentials("alice", "fresh").await.is_ok());
    assert!(matches!(
        store.verify_credentials("alice", "password").await,
        Err(Error::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_credentials_checked() {
    let store = setup_store().await;
    add_user(&store, "alice").await;

    assert!(store.verify_credentials("alice", "password").await.is_ok());
    assert!(matches!(
        store.verify_credentials("alice", "wrong").await,
        Err(Error::Unauthorized(_))
    ));
    assert!(matches!(
        store.verify_credentials("nobody", "password").await,
        Err(Error::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let store = setup_store().await;
    add_user(&store, "alice").await;

    let result = store
        .create_user("alice", "other@example.com", "password")
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let store = setup_store().await;
    let user = add_user(&store, "alice").await;
    let shirt = add(&store, user.id, Category::Tops, "shirt").await;
    closet::assemble_outfit(&store, user.id, None, &tops(&[shirt])).await.unwrap();
    let token = store.create_session(user.id, 3600).await.unwrap();

    store.delete_user(user.id).await.unwrap();

    assert!(store.list_items_by_owner(user.id).await.unwrap().is_empty());
    assert!(store.list_outfits_by_owner(user.id).await.unwrap().is_empty());
    assert!(store.resolve_session(&token).await.is_err());
}
