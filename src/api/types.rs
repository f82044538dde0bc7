use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Booking, ItemBookings, commands::RequestBooking, value_objects::*};

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: i64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl CreateBookingRequest {
    pub fn to_command(&self, booker_id: UserId, requested_at: DateTime<Utc>) -> RequestBooking {
        RequestBooking {
            booker_id,
            item_id: ItemId::new(self.item_id),
            start: self.start,
            end: self.end,
            requested_at,
        }
    }
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id）
#[derive(Debug, Deserialize)]
pub struct DecideBookingQuery {
    pub approved: bool,
}

/// 予約一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// 状態キーワード（未指定はALL）
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
    /// 基準時刻（未指定はリクエスト受信時刻）
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct BookerSummary {
    pub id: i64,
}

/// 予約レスポンス
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemSummary,
    pub booker: BookerSummary,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            start: booking.start,
            end: booking.end,
            status: booking.status,
            item: ItemSummary {
                id: booking.item.id.value(),
                name: booking.item.name,
            },
            booker: BookerSummary {
                id: booking.booker_id.value(),
            },
        }
    }
}

/// アイテムに紐づく予約の要約
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortResponse {
    pub id: i64,
    pub booker_id: i64,
}

impl From<Booking> for BookingShortResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            booker_id: booking.booker_id.value(),
        }
    }
}

/// 所有者向けの直前・直後の予約（GET /items/:id/bookings）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBookingsResponse {
    pub last_booking: Option<BookingShortResponse>,
    pub next_booking: Option<BookingShortResponse>,
}

impl From<ItemBookings> for ItemBookingsResponse {
    fn from(bookings: ItemBookings) -> Self {
        Self {
            last_booking: bookings.last.map(BookingShortResponse::from),
            next_booking: bookings.next.map(BookingShortResponse::from),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
