use crate::domain::{
    BookingId, BookingRuleError, DecisionError, ItemId, PaginationError, TimeRangeError,
    UnsupportedState, UserId,
};
use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// ユーザーが存在しない
    #[error("User with id {0} not found")]
    UserNotFound(UserId),

    /// アイテムが存在しない
    #[error("Item with id {0} not found")]
    ItemNotFound(ItemId),

    /// 予約が存在しない（閲覧権限がない場合も含む）
    #[error("Booking with id {0} not found")]
    BookingNotFound(BookingId),

    /// 予約期間が不正
    #[error("Invalid booking time: {0}")]
    InvalidTimeRange(#[from] TimeRangeError),

    /// アイテムが貸出不可
    #[error("Item with id {0} is not available for booking")]
    ItemUnavailable(ItemId),

    /// 自分のアイテムを予約しようとした
    #[error("User with id {0} cannot book their own item")]
    SelfBookingForbidden(UserId),

    /// 承認・却下の権限がない
    #[error("User with id {user_id} has no rights to decide booking {booking_id}")]
    Forbidden {
        user_id: UserId,
        booking_id: BookingId,
    },

    /// 既に承認済み
    #[error("Booking with id {0} is already approved")]
    AlreadyApproved(BookingId),

    /// 未知の状態キーワード
    #[error(transparent)]
    UnsupportedState(#[from] UnsupportedState),

    /// ページング指定が不正
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    ItemCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    BookingStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingApplicationError {
    /// 作成時のルール違反を文脈付きのエラーに変換する
    pub(super) fn from_rule(err: BookingRuleError, item_id: ItemId, booker_id: UserId) -> Self {
        match err {
            BookingRuleError::ItemUnavailable => Self::ItemUnavailable(item_id),
            BookingRuleError::SelfBookingForbidden => Self::SelfBookingForbidden(booker_id),
        }
    }

    /// 承認・却下のエラーを文脈付きのエラーに変換する
    pub(super) fn from_decision(
        err: DecisionError,
        booking_id: BookingId,
        user_id: UserId,
    ) -> Self {
        match err {
            DecisionError::NotOwner => Self::Forbidden {
                user_id,
                booking_id,
            },
            DecisionError::AlreadyApproved => Self::AlreadyApproved(booking_id),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
