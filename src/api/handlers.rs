use crate::application::lending::{
    LendingApplicationError, ServiceDependencies, add_book as execute_add_book,
    authorize_add_book, authorize_return_book, borrow_history as execute_borrow_history,
    list_books as execute_list_books, register_user as execute_register_user,
    return_book as execute_return_book, submit_borrow_request as execute_submit_borrow_request,
};
use crate::domain::{BorrowRequestId, commands::ReturnBook};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    auth::AuthenticatedUser,
    error::ApiError,
    types::{
        AddBookRequest, BookAddedResponse, BookResponse, BorrowBookRequest, BorrowHistoryEntry,
        BorrowRequestCreatedResponse, MessageResponse, RegisterRequest, UserRegisteredResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /register - 利用者を登録
///
/// 認証不要。メールアドレスは大文字小文字を区別せずに一意。
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserRegisteredResponse>), ApiError> {
    let Json(req) = payload?;
    let user_id = execute_register_user(&state.service_deps, req.to_command()).await?;

    let response = UserRegisteredResponse {
        message: "User created successfully.".to_string(),
        user_id: user_id.value(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /addBook - 蔵書を追加
///
/// 強制されるビジネスルール:
/// - 司書であること
/// - タイトルと著者が指定されていること
/// - タイトルが登録済みでないこと（大文字小文字を区別しない）
///
/// 本文が読めない場合も、権限の判定を先に行う。
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<AddBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookAddedResponse>), ApiError> {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            authorize_add_book(&user)?;
            return Err(rejection.into());
        }
    };

    let book_id = execute_add_book(&state.service_deps, &user, req.to_command()).await?;

    let response = BookAddedResponse {
        message: "Book added successfully.".to_string(),
        book_id: book_id.value(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /requestBook - 貸出を申請
///
/// 強制されるビジネスルール:
/// - 書籍ID・開始日・終了日（YYYY-MM-DD）が指定されていること
/// - 書籍が存在すること
/// - 同じ書籍の承認済み申請と期間が重ならないこと
pub async fn request_book(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<BorrowBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BorrowRequestCreatedResponse>), ApiError> {
    let Json(req) = payload?;
    let request_id =
        execute_submit_borrow_request(&state.service_deps, &user, req.to_command()).await?;

    let response = BorrowRequestCreatedResponse {
        message: "Borrow request submitted successfully.".to_string(),
        request_id: request_id.value(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /requests/:id/return - 返却済みにする
///
/// 強制されるビジネスルール:
/// - 司書であること
/// - 申請が存在すること
/// - 既に返却済みでないこと
///
/// UUIDとして読めないIDは、司書に対しては存在しない申請として扱う。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Path(request_id) = match path {
        Ok(path) => path,
        Err(rejection) => {
            authorize_return_book(&user)?;
            tracing::debug!(reason = %rejection.body_text(), "malformed request id");
            return Err(LendingApplicationError::BorrowRequestNotFound.into());
        }
    };

    let cmd = ReturnBook {
        request_id: BorrowRequestId::from_uuid(request_id),
    };

    execute_return_book(&state.service_deps, &user, cmd).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Book marked as returned successfully.")),
    ))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /getBooks - 全蔵書を取得
pub async fn get_books(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = execute_list_books(&state.service_deps).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /user/borrow_history - 自分の貸出履歴を取得
///
/// 履歴が1件もない場合は 400 を返す。
pub async fn borrow_history(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<BorrowHistoryEntry>>, ApiError> {
    let history = execute_borrow_history(&state.service_deps, &user).await?;

    Ok(Json(
        history.into_iter().map(BorrowHistoryEntry::from).collect(),
    ))
}
