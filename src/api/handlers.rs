use crate::application::booking::{
    ServiceDependencies, decide_booking as execute_decide_booking,
    get_booking as execute_get_booking, item_bookings as execute_item_bookings,
    list_owner_bookings as execute_list_owner_bookings,
    list_renter_bookings as execute_list_renter_bookings,
    request_booking as execute_request_booking,
};
use crate::domain::{
    BookingState,
    commands::{DecideBooking, ListBookings},
    value_objects::{BookingId, ItemId, UserId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookingResponse, CreateBookingRequest, DecideBookingQuery, ItemBookingsResponse,
        ListBookingsQuery,
    },
};

/// 操作ユーザーIDを運ぶヘッダー
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// ヘッダーから操作ユーザーIDを取り出す
fn sharer_user_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let raw = headers
        .get(SHARER_USER_ID_HEADER)
        .ok_or_else(|| ApiError::BadRequest(format!("{} header is required", SHARER_USER_ID_HEADER)))?;

    raw.to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map(UserId::new)
        .ok_or_else(|| {
            ApiError::BadRequest(format!("{} header must be a number", SHARER_USER_ID_HEADER))
        })
}

impl ListBookingsQuery {
    fn into_query(self, user_id: UserId) -> ListBookings {
        ListBookings {
            user_id,
            state: self
                .state
                .unwrap_or_else(|| BookingState::All.as_str().to_string()),
            from: self.from,
            size: self.size,
            time: self.time.unwrap_or_else(Utc::now),
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /bookings - 予約を申し込む
///
/// 強制されるビジネスルール:
/// - 予約者とアイテムが存在すること
/// - 予約期間が未来で、開始 < 終了であること
/// - アイテムが貸出可能で、自分のアイテムでないこと
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booker_id = sharer_user_id(&headers)?;
    let cmd = req.to_command(booker_id, Utc::now());

    let booking = execute_request_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:id?approved=true|false - 予約を承認・却下する
pub async fn decide_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Query(query): Query<DecideBookingQuery>,
    headers: HeaderMap,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = DecideBooking {
        booking_id: BookingId::new(booking_id),
        acting_user_id: sharer_user_id(&headers)?,
        approve: query.approved,
    };

    let booking = execute_decide_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細を取得
///
/// 予約者または所有者以外には404を返す。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<BookingResponse>, ApiError> {
    let requester_id = sharer_user_id(&headers)?;

    let booking =
        execute_get_booking(&state.service_deps, BookingId::new(booking_id), requester_id).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings - 予約者としての予約一覧
///
/// クエリパラメータ:
/// - state: ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED（オプション、既定はALL）
/// - from, size: ページング（両方指定時のみ有効）
/// - time: 基準時刻（オプション）
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let query = query.into_query(sharer_user_id(&headers)?);

    let bookings = execute_list_renter_bookings(&state.service_deps, query).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner - 所有者としての予約一覧
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let query = query.into_query(sharer_user_id(&headers)?);

    let bookings = execute_list_owner_bookings(&state.service_deps, query).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /items/:id/bookings - 所有者向けの直前・直後の予約
pub async fn get_item_bookings(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ItemBookingsResponse>, ApiError> {
    let requester_id = sharer_user_id(&headers)?;

    let bookings = execute_item_bookings(
        &state.service_deps,
        ItemId::new(item_id),
        requester_id,
        Utc::now(),
    )
    .await?;

    Ok(Json(ItemBookingsResponse::from(bookings)))
}
