use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Book, BookId, BorrowRequest, DATE_FORMAT,
    commands::{AddBook, RegisterUser, SubmitBorrowRequest},
};

/// 利用者登録リクエスト（POST /register）
///
/// 欠けた項目はアプリケーション層で検証するため、すべて任意で受け取る。
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub is_librarian: bool,
}

impl RegisterRequest {
    pub fn to_command(self) -> RegisterUser {
        RegisterUser {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            is_librarian: self.is_librarian,
        }
    }
}

/// 蔵書追加リクエスト（POST /addBook）
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl AddBookRequest {
    pub fn to_command(self) -> AddBook {
        AddBook {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
        }
    }
}

/// 貸出申請リクエスト（POST /requestBook）
#[derive(Debug, Deserialize)]
pub struct BorrowBookRequest {
    pub book_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl BorrowBookRequest {
    pub fn to_command(self) -> SubmitBorrowRequest {
        SubmitBorrowRequest {
            book_id: self.book_id.map(BookId::from_uuid),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
        }
    }
}

/// メッセージのみのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 利用者登録レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisteredResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// 蔵書追加レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookAddedResponse {
    pub message: String,
    pub book_id: Uuid,
}

/// 貸出申請レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowRequestCreatedResponse {
    pub message: String,
    pub request_id: Uuid,
}

/// 書籍レスポンス（GET /getBooks）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.book_id.value(),
            title: book.title.as_str().to_string(),
            author: book.author,
            available: book.available,
        }
    }
}

/// 貸出履歴の1件（GET /user/borrow_history）
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowHistoryEntry {
    pub request_id: Uuid,
    pub book_id: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl From<BorrowRequest> for BorrowHistoryEntry {
    fn from(request: BorrowRequest) -> Self {
        Self {
            request_id: request.request_id.value(),
            book_id: request.book_id.value(),
            start_date: request.period.start.format(DATE_FORMAT).to_string(),
            end_date: request.period.end.format(DATE_FORMAT).to_string(),
            status: request.status.as_str().to_string(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
