use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId, UserId};

/// コマンド：アイテムの予約を申し込む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBooking {
    pub booker_id: UserId,
    pub item_id: ItemId,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：予約を承認・却下する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub booking_id: BookingId,
    pub acting_user_id: UserId,
    pub approve: bool,
}

/// クエリ：予約一覧（予約者または所有者として）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookings {
    pub user_id: UserId,
    /// 状態キーワード（未検証の文字列）
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
    pub time: DateTime<Utc>,
}
