use super::MemoryStore;
use crate::domain::{Book, BookId, BookTitle};
use crate::ports::book_repository::{BookRepository, Result};
use async_trait::async_trait;

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.books.clone())
    }

    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let state = self.lock()?;
        Ok(state.books.iter().find(|b| b.book_id == book_id).cloned())
    }

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>> {
        let state = self.lock()?;
        Ok(state.books.iter().find(|b| &b.title == title).cloned())
    }

    async fn insert(&self, book: Book) -> Result<()> {
        let mut state = self.lock()?;
        if state.books.iter().any(|b| b.title == book.title) {
            return Err(format!("duplicate title: {}", book.title.as_str()).into());
        }
        state.books.push(book);
        Ok(())
    }
}
