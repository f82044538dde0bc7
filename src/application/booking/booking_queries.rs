use crate::domain::{
    self, Booking, BookingState, ItemBookings, Subject, commands::ListBookings,
    value_objects::{ItemId, UserId},
};
use chrono::{DateTime, Utc};

use super::booking_service::{ServiceDependencies, load_item, load_user};
use super::errors::{BookingApplicationError, Result};

async fn run_listing(
    deps: &ServiceDependencies,
    state: BookingState,
    subject: Subject,
    query: &ListBookings,
) -> Result<Vec<Booking>> {
    let page = domain::resolve_page(query.from, query.size)?;
    let booking_query = domain::classify(state, query.time, subject, page);

    let bookings = deps
        .booking_store
        .query(&booking_query)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    tracing::debug!(
        user_id = %subject.user_id(),
        state = state.as_str(),
        count = bookings.len(),
        "Bookings listed"
    );

    Ok(bookings)
}

/// 予約者としての予約一覧
///
/// ユーザーの存在確認を先に行い、その後に状態キーワードを検証する。
pub async fn list_renter_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<Booking>> {
    load_user(deps, query.user_id).await?;
    let state: BookingState = query.state.parse()?;

    run_listing(deps, state, Subject::Booker(query.user_id), &query).await
}

/// 所有者としての予約一覧
///
/// 予約者向けとは逆に、状態キーワードを先に検証してからユーザーの存在を確認する。
pub async fn list_owner_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<Booking>> {
    let state: BookingState = query.state.parse()?;
    load_user(deps, query.user_id).await?;

    run_listing(deps, state, Subject::Owner(query.user_id), &query).await
}

/// アイテム所有者向けの直前・直後の予約
///
/// 所有者以外には空の結果を返す。
pub async fn item_bookings(
    deps: &ServiceDependencies,
    item_id: ItemId,
    requester_id: UserId,
    time: DateTime<Utc>,
) -> Result<ItemBookings> {
    let item = load_item(deps, item_id).await?;
    if !item.is_owned_by(requester_id) {
        return Ok(ItemBookings::default());
    }

    let last = deps
        .booking_store
        .find_last_for_item(item_id, time)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;
    let next = deps
        .booking_store
        .find_next_for_item(item_id, time)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    Ok(ItemBookings { last, next })
}

/// ユーザーが `instant` より前に終了した予約をアイテムに持っているか
pub async fn has_completed_booking(
    deps: &ServiceDependencies,
    item_id: ItemId,
    booker_id: UserId,
    instant: DateTime<Utc>,
) -> Result<bool> {
    let finished = deps
        .booking_store
        .find_for_item_and_booker_ending_before(item_id, booker_id, instant)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    Ok(!finished.is_empty())
}
