use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// PostgreSQL implementation of ItemCatalog
///
/// Reads the `items` table owned by the item catalog context.
pub struct ItemCatalog {
    pool: PgPool,
}

impl ItemCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query("SELECT id, name, available, owner_id FROM items WHERE id = $1")
            .bind(item_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Item {
            id: ItemId::new(row.get("id")),
            name: row.get("name"),
            available: row.get("available"),
            owner_id: UserId::new(row.get("owner_id")),
        }))
    }
}
