use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    /// リクエスト自体の不備（ヘッダー欠落など）
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        let err = match self {
            ApiError::BadRequest(_) => return (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Application(err) => err,
        };

        match err {
            // 404 Not Found - 存在しない、または権限がない
            BookingApplicationError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            BookingApplicationError::ItemNotFound(_) => (StatusCode::NOT_FOUND, "ITEM_NOT_FOUND"),
            BookingApplicationError::BookingNotFound(_) => {
                (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND")
            }
            BookingApplicationError::SelfBookingForbidden(_) => {
                (StatusCode::NOT_FOUND, "SELF_BOOKING_FORBIDDEN")
            }
            BookingApplicationError::Forbidden { .. } => (StatusCode::NOT_FOUND, "FORBIDDEN"),

            // 400 Bad Request - 入力やビジネスルール違反
            BookingApplicationError::InvalidTimeRange(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_TIME_RANGE")
            }
            BookingApplicationError::ItemUnavailable(_) => {
                (StatusCode::BAD_REQUEST, "ITEM_UNAVAILABLE")
            }
            BookingApplicationError::AlreadyApproved(_) => {
                (StatusCode::BAD_REQUEST, "ALREADY_APPROVED")
            }
            BookingApplicationError::UnsupportedState(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_STATUS")
            }
            BookingApplicationError::InvalidPagination(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_PAGINATION")
            }

            // 500 Internal Server Error - システム障害
            BookingApplicationError::UserDirectoryError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "USER_DIRECTORY_ERROR")
            }
            BookingApplicationError::ItemCatalogError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ITEM_CATALOG_ERROR")
            }
            BookingApplicationError::BookingStoreError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "BOOKING_STORE_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.parts();

        let message = if status.is_server_error() {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            let detail = match &self {
                ApiError::Application(err) => std::error::Error::source(err)
                    .map(|source| source.to_string())
                    .unwrap_or_else(|| err.to_string()),
                ApiError::BadRequest(msg) => msg.clone(),
            };
            tracing::error!(error_type, detail = %detail, "Internal error");
            "An unexpected error occurred".to_string()
        } else {
            match self {
                ApiError::Application(err) => err.to_string(),
                ApiError::BadRequest(msg) => msg,
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
