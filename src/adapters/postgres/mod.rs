pub mod book_repository;
pub mod borrow_ledger;
pub mod user_repository;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrow_ledger::BorrowLedger as PostgresBorrowLedger;
pub use user_repository::UserRepository as PostgresUserRepository;

/// 行データの不正をエラーに変換する
pub(crate) fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}
