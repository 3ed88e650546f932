use serde::{Deserialize, Serialize};

use super::{BookId, BorrowRequestId};

/// コマンド：利用者を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub is_librarian: bool,
}

/// コマンド：蔵書を追加する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
}

/// コマンド：貸出を申請する
///
/// 日付は YYYY-MM-DD の文字列のまま受け取り、アプリケーション層で解析する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBorrowRequest {
    pub book_id: Option<BookId>,
    pub start_date: String,
    pub end_date: String,
}

/// コマンド：書籍を返却済みにする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub request_id: BorrowRequestId,
}
