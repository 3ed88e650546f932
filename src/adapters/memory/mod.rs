pub mod book_repository;
pub mod borrow_ledger;
pub mod user_repository;

use crate::domain::{Book, BorrowRequest, User};
use std::sync::{Mutex, MutexGuard};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// In-memory implementation of every storage port
///
/// Users, books and borrow requests share one lock so that a ledger write and
/// the matching availability flip happen together. Rows are kept in insertion
/// order. Used by tests and by the binary when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    books: Vec<Book>,
    borrow_requests: Vec<BorrowRequest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| "memory store lock poisoned".into())
    }
}
