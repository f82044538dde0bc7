use crate::domain::{Booking, BookingId, BookingQuery, ItemId, NewBooking, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// 読み取り→更新の間にロックは取らない。同じ予約への同時更新は後勝ちになる。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 新しい予約を保存し、採番済みの予約を返す
    async fn create(&self, booking: NewBooking) -> Result<Booking>;

    /// 既存の予約を上書き保存する
    async fn save(&self, booking: Booking) -> Result<Booking>;

    /// IDで予約を取得する
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 状態分類の問い合わせを実行する
    ///
    /// 絞り込み、並び順、ページングはすべて `BookingQuery` に従う。
    async fn query(&self, query: &BookingQuery) -> Result<Vec<Booking>>;

    /// アイテムと予約者で、`instant` より前に終了した予約を検索する
    async fn find_for_item_and_booker_ending_before(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// `instant` までに開始した予約のうち、終了が最も遅いもの
    async fn find_last_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>>;

    /// `instant` より後に開始する却下されていない予約のうち、開始が最も早いもの
    async fn find_next_for_item(
        &self,
        item_id: ItemId,
        instant: DateTime<Utc>,
    ) -> Result<Option<Booking>>;
}
