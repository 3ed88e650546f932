mod borrowing;
mod catalog;
mod credentials;
mod dependencies;
mod errors;

pub use borrowing::{authorize_return_book, borrow_history, return_book, submit_borrow_request};
pub use catalog::{add_book, authorize_add_book, list_books};
pub use credentials::{authenticate, ensure_librarian, register_user};
pub use dependencies::ServiceDependencies;
pub use errors::{ErrorKind, LendingApplicationError, Result};
