use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, BookingRuleError, BookingStatus, DecisionError, Item, TimeRange, TimeRangeError,
    UserId,
};

/// Booking集約 - 1つのアイテムに対する1回の予約
///
/// アイテムと予約者への参照は所有しない（アイテムは作成時点のスナップショット）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: Item,
    pub booker_id: UserId,
}

impl Booking {
    pub fn owner_id(&self) -> UserId {
        self.item.owner_id
    }

    /// 予約者またはアイテム所有者のみ閲覧できる
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.booker_id == user_id || self.item.is_owned_by(user_id)
    }
}

/// 未保存の予約（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub range: TimeRange,
    pub status: BookingStatus,
    pub item: Item,
    pub booker_id: UserId,
}

/// アイテム所有者向けの直近予約
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemBookings {
    /// 開始済みで終了が最も遅い予約
    pub last: Option<Booking>,
    /// 未開始かつ却下されていない、開始が最も早い予約
    pub next: Option<Booking>,
}

/// 純粋関数：予約期間の検証
///
/// 次の順で判定し、最初に該当したエラーを返す：
/// 開始未指定、終了未指定、開始 == 終了、終了 < 開始、開始 < now、終了 < now
///
/// 開始がちょうど `now` の場合は受け付ける。
pub fn validate_time_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<TimeRange, TimeRangeError> {
    let start = start.ok_or(TimeRangeError::MissingStart)?;
    let end = end.ok_or(TimeRangeError::MissingEnd)?;

    if start == end {
        return Err(TimeRangeError::StartEqualsEnd);
    }
    if end < start {
        return Err(TimeRangeError::EndBeforeStart);
    }
    if start < now {
        return Err(TimeRangeError::StartInPast);
    }
    if end < now {
        return Err(TimeRangeError::EndInPast);
    }

    Ok(TimeRange::new_unchecked(start, end))
}

/// 純粋関数：アイテムが予約可能か確認する
///
/// ビジネスルール：
/// - 貸出不可のアイテムは予約できない
/// - 所有者は自分のアイテムを予約できない
pub fn check_availability(item: &Item, requester_id: UserId) -> Result<(), BookingRuleError> {
    if !item.available {
        return Err(BookingRuleError::ItemUnavailable);
    }
    if item.is_owned_by(requester_id) {
        return Err(BookingRuleError::SelfBookingForbidden);
    }
    Ok(())
}

/// 純粋関数：予約を申し込む
///
/// 予約はWAITINGで作成される。副作用なし。
pub fn request_booking(
    item: Item,
    booker_id: UserId,
    range: TimeRange,
) -> Result<NewBooking, BookingRuleError> {
    check_availability(&item, booker_id)?;

    Ok(NewBooking {
        range,
        status: BookingStatus::Waiting,
        item,
        booker_id,
    })
}

/// 純粋関数：予約を承認・却下する
///
/// ビジネスルール：
/// - アイテム所有者のみが判断できる
/// - 承認済みの予約は再承認できない
/// - 却下は現在の状態に関係なく常に受け付ける（承認済みからの却下も可）
pub fn decide(
    booking: Booking,
    acting_user_id: UserId,
    approve: bool,
) -> Result<Booking, DecisionError> {
    if !booking.item.is_owned_by(acting_user_id) {
        return Err(DecisionError::NotOwner);
    }

    let status = if approve {
        if booking.status.is_approved() {
            return Err(DecisionError::AlreadyApproved);
        }
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    };

    Ok(Booking { status, ..booking })
}
