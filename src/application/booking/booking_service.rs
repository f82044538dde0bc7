use crate::domain::{self, commands::*, value_objects::*};
use crate::domain::{Booking, Item, User};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に引数として渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
    pub booking_store: Arc<dyn BookingStore>,
}

/// ユーザーを取得するヘルパー関数
///
/// # エラー
/// - UserDirectoryError: 取得失敗
/// - UserNotFound: 存在しない
pub(super) async fn load_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.user_directory
        .find_by_id(user_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?
        .ok_or(BookingApplicationError::UserNotFound(user_id))
}

/// アイテムを取得するヘルパー関数
pub(super) async fn load_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    deps.item_catalog
        .find_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemCatalogError)?
        .ok_or(BookingApplicationError::ItemNotFound(item_id))
}

/// 予約を取得するヘルパー関数
async fn load_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    deps.booking_store
        .find_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::BookingNotFound(booking_id))
}

/// アイテムの予約を申し込む
///
/// 検証順：
/// 1. 予約者が存在すること
/// 2. アイテムが存在すること
/// 3. 予約期間が正しいこと（`cmd.requested_at` 基準）
/// 4. アイテムが貸出可能で、予約者が所有者でないこと
///
/// 同じアイテムの期間重複は確認しない。
///
/// # 戻り値
/// WAITING状態で保存された予約
pub async fn request_booking(deps: &ServiceDependencies, cmd: RequestBooking) -> Result<Booking> {
    load_user(deps, cmd.booker_id).await?;
    let item = load_item(deps, cmd.item_id).await?;

    let range = domain::validate_time_range(cmd.start, cmd.end, cmd.requested_at)?;
    let new_booking = domain::request_booking(item, cmd.booker_id, range).map_err(|e| {
        tracing::warn!(
            item_id = %cmd.item_id,
            booker_id = %cmd.booker_id,
            reason = %e,
            "Booking request rejected"
        );
        BookingApplicationError::from_rule(e, cmd.item_id, cmd.booker_id)
    })?;

    let booking = deps
        .booking_store
        .create(new_booking)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    tracing::info!(
        booking_id = %booking.id,
        item_id = %cmd.item_id,
        booker_id = %cmd.booker_id,
        "Booking created"
    );

    Ok(booking)
}

/// 予約を承認・却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - アイテム所有者であること
/// - 承認の場合、既に承認済みでないこと
///
/// 読み取りから保存までロックを取らないため、同時に呼ばれた場合は後の保存が残る。
pub async fn decide_booking(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<Booking> {
    let booking = load_booking(deps, cmd.booking_id).await?;

    let decided = domain::decide(booking, cmd.acting_user_id, cmd.approve).map_err(|e| {
        BookingApplicationError::from_decision(e, cmd.booking_id, cmd.acting_user_id)
    })?;

    let saved = deps
        .booking_store
        .save(decided)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    tracing::info!(
        booking_id = %saved.id,
        status = saved.status.as_str(),
        "Booking decided"
    );

    Ok(saved)
}

/// 予約を1件取得する
///
/// 予約者でも所有者でもない場合は、存在を隠すため `BookingNotFound` を返す。
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    requester_id: UserId,
) -> Result<Booking> {
    load_user(deps, requester_id).await?;
    let booking = load_booking(deps, booking_id).await?;

    if !booking.is_visible_to(requester_id) {
        tracing::debug!(
            booking_id = %booking_id,
            requester_id = %requester_id,
            "Booking hidden from unrelated user"
        );
        return Err(BookingApplicationError::BookingNotFound(booking_id));
    }

    Ok(booking)
}
