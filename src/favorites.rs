//! Favorite persistence.
//!
//! Validation lives in the gateway functions; record identity and timestamps
//! belong to the store. [`FavoriteStore`] keeps the backend swappable:
//! SQLite in production, [`MemoryFavoriteStore`] where tests need to observe
//! exactly which calls reached storage.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::config::Config;
use crate::db;
use crate::error::{Error, Result};
use crate::models::FavoriteRecord;

/// Storage backend for favorites.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Insert an already-validated favorite; the store assigns `id` and
    /// `created_at`.
    async fn insert(&self, fruit_name: &str, notes: &str) -> Result<FavoriteRecord>;

    /// All stored favorites, newest first.
    async fn list_newest_first(&self) -> Result<Vec<FavoriteRecord>>;
}

/// Validate and persist a favorite-creation request.
///
/// `fruit_name` must be non-empty after trimming; `notes` defaults to the
/// empty string. Invalid input never reaches the store.
pub async fn save_favorite(
    store: &dyn FavoriteStore,
    fruit_name: &str,
    notes: Option<&str>,
) -> Result<FavoriteRecord> {
    let fruit_name = fruit_name.trim();
    if fruit_name.is_empty() {
        return Err(Error::InvalidInput("fruit_name is required".to_string()));
    }
    let notes = notes.unwrap_or("").trim();
    store.insert(fruit_name, notes).await
}

/// Stored favorites, newest first, passed through unmodified.
pub async fn list_favorites(store: &dyn FavoriteStore) -> Result<Vec<FavoriteRecord>> {
    store.list_newest_first().await
}

/// SQLite-backed store. Timestamps are unix milliseconds in the table and
/// ISO 8601 on the way out.
pub struct SqliteFavoriteStore {
    pool: SqlitePool,
}

impl SqliteFavoriteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteFavoriteStore { pool }
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn insert(&self, fruit_name: &str, notes: &str) -> Result<FavoriteRecord> {
        let id = Uuid::new_v4().to_string();
        let created_ms = Utc::now().timestamp_millis();

        sqlx::query(
            "INSERT INTO favorites (id, fruit_name, notes, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(fruit_name)
        .bind(notes)
        .bind(created_ms)
        .execute(&self.pool)
        .await?;

        Ok(FavoriteRecord {
            id,
            fruit_name: fruit_name.to_string(),
            notes: notes.to_string(),
            created_at: format_ts_iso(created_ms),
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<FavoriteRecord>> {
        // rowid breaks ties for rows created in the same millisecond
        let rows = sqlx::query(
            "SELECT id, fruit_name, notes, created_at FROM favorites ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| FavoriteRecord {
                id: row.get("id"),
                fruit_name: row.get("fruit_name"),
                notes: row.get("notes"),
                created_at: format_ts_iso(row.get("created_at")),
            })
            .collect())
    }
}

/// In-memory store for tests. Keeps insertion order and exposes how many
/// records were ever inserted, so a test can assert that invalid input
/// produced no store call at all.
#[derive(Default)]
pub struct MemoryFavoriteStore {
    records: RwLock<Vec<FavoriteRecord>>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        MemoryFavoriteStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn insert(&self, fruit_name: &str, notes: &str) -> Result<FavoriteRecord> {
        let record = FavoriteRecord {
            id: Uuid::new_v4().to_string(),
            fruit_name: fruit_name.to_string(),
            notes: notes.to_string(),
            created_at: format_ts_iso(Utc::now().timestamp_millis()),
        };
        self.records.write().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_newest_first(&self) -> Result<Vec<FavoriteRecord>> {
        let mut records = self.records.read().unwrap().clone();
        records.reverse();
        Ok(records)
    }
}

fn format_ts_iso(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// CLI entry point — prints stored favorites, newest first.
pub async fn run_favorites_list(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let store = SqliteFavoriteStore::new(pool);

    let favorites = match list_favorites(&store).await {
        Ok(favorites) => favorites,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if favorites.is_empty() {
        println!("No favorites saved.");
        return Ok(());
    }

    println!("{:<26} {:<20} NOTES", "CREATED", "FRUIT");
    for favorite in &favorites {
        println!(
            "{:<26} {:<20} {}",
            favorite.created_at, favorite.fruit_name, favorite.notes
        );
    }

    Ok(())
}

/// CLI entry point — validates and stores one favorite.
pub async fn run_favorites_add(config: &Config, fruit_name: &str, notes: &str) -> anyhow::Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let store = SqliteFavoriteStore::new(pool);

    let favorite = match save_favorite(&store, fruit_name, Some(notes)).await {
        Ok(favorite) => favorite,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Saved favorite:");
    println!("  id:         {}", favorite.id);
    println!("  fruit_name: {}", favorite.fruit_name);
    if !favorite.notes.is_empty() {
        println!("  notes:      {}", favorite.notes);
    }
    println!("  created_at: {}", favorite.created_at);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_favorite_trims_and_stores() {
        let store = MemoryFavoriteStore::new();

        let record = save_favorite(&store, "  Banana  ", Some("  so good  "))
            .await
            .unwrap();

        assert_eq!(record.fruit_name, "Banana");
        assert_eq!(record.notes, "so good");
        assert!(!record.id.is_empty());
        assert!(!record.created_at.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_save_favorite_defaults_notes() {
        let store = MemoryFavoriteStore::new();

        let record = save_favorite(&store, "Cherry", None).await.unwrap();
        assert_eq!(record.notes, "");
    }

    #[tokio::test]
    async fn test_blank_name_rejected_without_store_call() {
        let store = MemoryFavoriteStore::new();

        let result = save_favorite(&store, "   ", Some("notes")).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryFavoriteStore::new();
        save_favorite(&store, "Banana", None).await.unwrap();
        save_favorite(&store, "Cherry", None).await.unwrap();

        let favorites = list_favorites(&store).await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].fruit_name, "Cherry");
        assert_eq!(favorites[1].fruit_name, "Banana");
    }
}
