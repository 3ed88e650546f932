use crate::domain::{self, Book, BookId, BookTitle, User, commands::AddBook};

use super::credentials::ensure_librarian;
use super::dependencies::ServiceDependencies;
use super::errors::{LendingApplicationError, Result};

/// 全蔵書を取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books
        .list_all()
        .await
        .map_err(LendingApplicationError::BookRepositoryError)
}

/// 蔵書を追加できる利用者か確認する
///
/// 入力の内容に関係なく、他のどの検証よりも先に判定する。
pub fn authorize_add_book(user: &User) -> Result<()> {
    ensure_librarian(user, "Only librarians can add books.")
}

/// 蔵書を追加する
///
/// ビジネスルール：
/// - 司書のみ（入力内容より先に判定する）
/// - タイトルと著者は必須
/// - タイトルは大文字小文字を区別せずに一意
pub async fn add_book(deps: &ServiceDependencies, user: &User, cmd: AddBook) -> Result<BookId> {
    // 1. 権限確認
    authorize_add_book(user)?;

    // 2. 入力検証
    let author = cmd.author.trim();
    let title = BookTitle::parse(&cmd.title)
        .ok()
        .filter(|_| !author.is_empty())
        .ok_or(LendingApplicationError::InvalidInput(
            "Both title and author are required.",
        ))?;

    // 3. 重複確認
    let existing = deps
        .books
        .find_by_title(&title)
        .await
        .map_err(LendingApplicationError::BookRepositoryError)?;

    if existing.is_some() {
        return Err(LendingApplicationError::BookAlreadyExists);
    }

    // 4. 保存
    let book = domain::book::add_book(title, author.to_string(), chrono::Utc::now());
    let book_id = book.book_id;

    deps.books
        .insert(book)
        .await
        .map_err(LendingApplicationError::BookRepositoryError)?;

    tracing::info!(book_id = %book_id.value(), added_by = %user.user_id.value(), "book added");

    Ok(book_id)
}
