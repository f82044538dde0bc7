use crate::domain::{Booking, BookingId, BookingQuery, ItemId, NewBooking, UserId};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

struct State {
    next_id: i64,
    bookings: BTreeMap<BookingId, Booking>,
}

/// BookingStoreのインメモリ実装
///
/// IDは1から順に採番する。各操作はMutexで直列化されるが、
/// 操作をまたいだ排他（読み取り→保存）は行わない。
pub struct BookingStore {
    state: Mutex<State>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                bookings: BTreeMap::new(),
            }),
        }
    }

    /// テスト用に保存済みの予約をそのまま投入する（時刻の検証を通さない）
    pub fn insert(&self, booking: Booking) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(booking.id.value() + 1);
        state.bookings.insert(booking.id, booking);
    }

    fn snapshot(&self) -> Vec<Booking> {
        self.state.lock().unwrap().bookings.values().cloned().collect()
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking> {
        let mut state = self.state.lock().unwrap();
        let id = BookingId::new(state.next_id);
        state.next_id += 1;

        let created = Booking {
            id,
            start: booking.range.start(),
            end: booking.range.end(),
            status: booking.status,
            item: booking.item,
            booker_id: booking.booker_id,
        };
        state.bookings.insert(id, created.clone());
        Ok(created)
    }

    async fn save(&self, booking: Booking) -> Result<Booking> {
        let mut state = self.state.lock().unwrap();
        state.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self.state.lock().unwrap().bookings.get(&booking_id).cloned())
    }

    async fn query(&self, query: &BookingQuery) -> Result<Vec<Booking>> {
        Ok(query.apply(self.snapshot()))
    }

    async fn find_for_item_and_booker_ending_before(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|b| b.item.id == item_id && b.booker_id == booker_id && b.end < instant)
            .collect())
    }

    async fn find_last_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|b| b.item.id == item_id && b.start <= instant)
            .max_by(|a, b| a.end.cmp(&b.end).then_with(|| b.id.cmp(&a.id))))
    }

    async fn find_next_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|b| b.item.id == item_id && b.start > instant && !b.status.is_rejected())
            .min_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id))))
    }
}
