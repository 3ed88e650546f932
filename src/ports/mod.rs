pub mod book_repository;
pub mod borrow_ledger;
pub mod password_hasher;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use borrow_ledger::{AdmissionOutcome, BorrowLedger, ReturnOutcome};
pub use password_hasher::PasswordHasher;
pub use user_repository::UserRepository;
