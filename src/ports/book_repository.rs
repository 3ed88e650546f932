use crate::domain::{Book, BookId, BookTitle};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 蔵書リポジトリポート
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 全蔵書を登録順で取得する
    async fn list_all(&self) -> Result<Vec<Book>>;

    /// IDで書籍を取得する
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// タイトルで書籍を検索する（大文字小文字を区別しない）
    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>>;

    /// 書籍を保存する
    async fn insert(&self, book: Book) -> Result<()>;
}
