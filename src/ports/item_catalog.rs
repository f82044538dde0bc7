use crate::domain::{Item, ItemId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムカタログポート
///
/// 予約コンテキストはアイテムの貸出可否と所有者IDのみを参照する。
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// IDでアイテムを取得する（存在しなければNone）
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>>;
}
