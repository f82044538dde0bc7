use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// ユーザー（ユーザーディレクトリが所有）
///
/// 予約コンテキストでは存在確認にのみ使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// アイテム（アイテムカタログが所有）
///
/// 予約コンテキストが参照するのは貸出可否と所有者IDのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub available: bool,
    pub owner_id: UserId,
}

impl Item {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}
