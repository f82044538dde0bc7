use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// アイテムを登録して、貸出可否を後から切り替えられる。
pub struct ItemCatalog {
    items: Mutex<HashMap<ItemId, Item>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, item_id: ItemId, owner_id: UserId, available: bool) {
        self.items.lock().unwrap().insert(
            item_id,
            Item {
                id: item_id,
                name: format!("Item {}", item_id),
                available,
                owner_id,
            },
        );
    }

    /// 貸出可否を変更
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }
}
