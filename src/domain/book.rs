use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, BookTitle};

/// 書籍
///
/// 貸出可否はフラグ1つで表す。日付ごとの空き状況は持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub title: BookTitle,
    pub author: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 純粋関数：蔵書を登録する
///
/// 新しい書籍は常に貸出可能で登録される。
pub fn add_book(title: BookTitle, author: String, added_at: DateTime<Utc>) -> Book {
    Book {
        book_id: BookId::new(),
        title,
        author,
        available: true,
        created_at: added_at,
        updated_at: added_at,
    }
}
