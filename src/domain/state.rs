use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

use super::{Booking, BookingStatus, PageRequest, UnsupportedState, UserId};

/// 予約一覧の状態キーワード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }
}

/// 大文字小文字を区別しない
impl FromStr for BookingState {
    type Err = UnsupportedState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s.to_uppercase();
        match keyword.as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(UnsupportedState(keyword)),
        }
    }
}

/// 一覧の対象ユーザー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// 予約者として
    Booker(UserId),
    /// アイテム所有者として
    Owner(UserId),
}

impl Subject {
    pub fn user_id(&self) -> UserId {
        match self {
            Subject::Booker(id) | Subject::Owner(id) => *id,
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Subject::Booker(id) => booking.booker_id == *id,
            Subject::Owner(id) => booking.owner_id() == *id,
        }
    }
}

/// 状態キーワードに対応する述語
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    Any,
    /// start < t かつ end > t
    ActiveAt(DateTime<Utc>),
    /// end < t
    EndedBefore(DateTime<Utc>),
    /// start > t
    StartsAfter(DateTime<Utc>),
    Status(BookingStatus),
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        match *self {
            BookingFilter::Any => true,
            BookingFilter::ActiveAt(t) => booking.start < t && booking.end > t,
            BookingFilter::EndedBefore(t) => booking.end < t,
            BookingFilter::StartsAfter(t) => booking.start > t,
            BookingFilter::Status(status) => booking.status == status,
        }
    }
}

/// 並び順（同じendの場合はID昇順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    EndDesc,
    EndAsc,
}

impl SortOrder {
    pub fn compare(&self, a: &Booking, b: &Booking) -> Ordering {
        let by_end = match self {
            SortOrder::EndDesc => b.end.cmp(&a.end),
            SortOrder::EndAsc => a.end.cmp(&b.end),
        };
        by_end.then_with(|| a.id.cmp(&b.id))
    }
}

/// 予約ストアへの問い合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    pub subject: Subject,
    pub filter: BookingFilter,
    pub order: SortOrder,
    /// Noneなら全件
    pub page: Option<PageRequest>,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.subject.matches(booking) && self.filter.matches(booking)
    }

    /// メモリ上の予約に問い合わせを適用する（絞り込み、並べ替え、ページング）
    pub fn apply<I>(&self, bookings: I) -> Vec<Booking>
    where
        I: IntoIterator<Item = Booking>,
    {
        let mut matched: Vec<Booking> = bookings.into_iter().filter(|b| self.matches(b)).collect();
        matched.sort_by(|a, b| self.order.compare(a, b));

        match self.page {
            Some(page) => matched
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.size() as usize)
                .collect(),
            None => matched,
        }
    }
}

/// 純粋関数：状態キーワードを問い合わせに変換する
///
/// CURRENTの並び順のみ対象によって異なる（予約者：end昇順、所有者：end降順）。
pub fn classify(
    state: BookingState,
    time: DateTime<Utc>,
    subject: Subject,
    page: Option<PageRequest>,
) -> BookingQuery {
    let (filter, order) = match state {
        BookingState::All => (BookingFilter::Any, SortOrder::EndDesc),
        BookingState::Current => {
            let order = match subject {
                Subject::Booker(_) => SortOrder::EndAsc,
                Subject::Owner(_) => SortOrder::EndDesc,
            };
            (BookingFilter::ActiveAt(time), order)
        }
        BookingState::Past => (BookingFilter::EndedBefore(time), SortOrder::EndDesc),
        BookingState::Future => (BookingFilter::StartsAfter(time), SortOrder::EndDesc),
        BookingState::Waiting => (
            BookingFilter::Status(BookingStatus::Waiting),
            SortOrder::EndDesc,
        ),
        BookingState::Rejected => (
            BookingFilter::Status(BookingStatus::Rejected),
            SortOrder::EndDesc,
        ),
    };

    BookingQuery {
        subject,
        filter,
        order,
        page,
    }
}
