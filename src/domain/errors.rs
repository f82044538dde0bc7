use thiserror::Error;

/// 予約期間のエラー
///
/// 失敗の種類ごとに別のメッセージを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    /// 開始日時が未指定
    #[error("Booking start time must be specified")]
    MissingStart,
    /// 終了日時が未指定
    #[error("Booking end time must be specified")]
    MissingEnd,
    /// 開始と終了が同じ
    #[error("Booking start and end must not be equal")]
    StartEqualsEnd,
    /// 終了が開始より前
    #[error("Booking end must not be before its start")]
    EndBeforeStart,
    /// 開始が過去
    #[error("Booking start must not be in the past")]
    StartInPast,
    /// 終了が過去
    #[error("Booking end must not be in the past")]
    EndInPast,
}

/// 予約作成時のビジネスルール違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRuleError {
    /// アイテムが貸出不可
    #[error("Item is not available for booking")]
    ItemUnavailable,
    /// 自分のアイテムは予約できない
    #[error("Users cannot book their own item")]
    SelfBookingForbidden,
}

/// 承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// 判断したユーザーがアイテム所有者ではない
    #[error("Only the item owner can approve or reject a booking")]
    NotOwner,
    /// 既に承認済み
    #[error("Booking is already approved")]
    AlreadyApproved,
}

/// 未知の状態キーワード（大文字化したキーワードを保持）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown state: {0}")]
pub struct UnsupportedState(pub String);

/// ページング指定のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid pagination parameters: from={from}, size={size}")]
pub struct PaginationError {
    pub from: i64,
    pub size: i64,
}
