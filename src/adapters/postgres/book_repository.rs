use super::invalid_data;
use crate::domain::{Book, BookId, BookTitle};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let title_str: &str = row.get("title");
    let title = BookTitle::parse(title_str)
        .map_err(|e| invalid_data(format!("invalid title in books row: {:?}", e)))?;

    Ok(Book {
        book_id: BookId::from_uuid(row.get("book_id")),
        title,
        author: row.get("author"),
        available: row.get("available"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn list_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT book_id, title, author, available, created_at, updated_at
            FROM books
            ORDER BY created_at ASC, book_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT book_id, title, author, available, created_at, updated_at
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT book_id, title, author, available, created_at, updated_at
            FROM books
            WHERE lower(title) = lower($1)
            "#,
        )
        .bind(title.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn insert(&self, book: Book) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO books (book_id, title, author, available, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.book_id.value())
        .bind(book.title.as_str())
        .bind(&book.author)
        .bind(book.available)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
