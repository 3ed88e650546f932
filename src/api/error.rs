use crate::application::lending::{ErrorKind, LendingApplicationError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LendingApplicationError);

impl From<LendingApplicationError> for ApiError {
    fn from(err: LendingApplicationError) -> Self {
        ApiError(err)
    }
}

/// 本文がJSONとして読めない、または項目の型が合わない場合は入力エラーとして返す
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "request body rejected");
        ApiError(LendingApplicationError::InvalidInput(
            "Request body must be a JSON object with the expected fields.",
        ))
    }
}

impl ApiError {
    /// 分類からステータスコードを決める
    ///
    /// 重複・期間の重なり・返却済み・履歴なしは 400 として返す。
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidInput
            | ErrorKind::AlreadyExists
            | ErrorKind::AlreadyReturned
            | ErrorKind::Conflict
            | ErrorKind::NotAvailable => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.0 {
            LendingApplicationError::InvalidInput(_) => "INVALID_INPUT",
            LendingApplicationError::InvalidDateFormat => "INVALID_DATE_FORMAT",
            LendingApplicationError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            LendingApplicationError::BookAlreadyExists => "BOOK_ALREADY_EXISTS",
            LendingApplicationError::InvalidCredentials => "UNAUTHORIZED",
            LendingApplicationError::Forbidden(_) => "FORBIDDEN",
            LendingApplicationError::BookNotFound => "BOOK_NOT_FOUND",
            LendingApplicationError::BorrowRequestNotFound => "BORROW_REQUEST_NOT_FOUND",
            LendingApplicationError::ReturnedBookMissing => "BOOK_NOT_FOUND",
            LendingApplicationError::AlreadyReturned => "ALREADY_RETURNED",
            LendingApplicationError::BookUnavailable => "BOOK_NOT_AVAILABLE",
            LendingApplicationError::BorrowHistoryEmpty => "BORROW_HISTORY_EMPTY",
            LendingApplicationError::UserRepositoryError(_)
            | LendingApplicationError::BookRepositoryError(_)
            | LendingApplicationError::BorrowLedgerError(_)
            | LendingApplicationError::PasswordHasherError(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_code();

        let message = if self.0.kind() == ErrorKind::Internal {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            let source = std::error::Error::source(&self.0)
                .map(|e| e.to_string())
                .unwrap_or_default();
            tracing::error!("{}: {}", self.0, source);
            "An unexpected error occurred".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(ErrorResponse::new(error_type, message));
        let mut response = (status, body).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"library\""),
            );
        }

        response
    }
}
